// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Failed to parse PDF document: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("Encrypted PDFs are not supported")]
    Encrypted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("page render failed: {0}")]
    Render(String),

    #[error("recognition failed: {0}")]
    Recognize(String),

    #[error("engine produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("PDF processing failed: {0}")]
    Pdf(#[from] PdfError),
}
