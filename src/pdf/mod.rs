// src/pdf/mod.rs
pub mod document;
pub mod ocr;

#[cfg(test)]
pub mod test_support;

pub use document::ReportPdf;
pub use ocr::{OcrEngine, PopplerTesseract};
