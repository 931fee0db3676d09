// src/main.rs
mod extractors;
mod pdf;
mod utils;
mod web;

use clap::Parser;
use extractors::section::SectionSplitter;
use extractors::text::TextExtractor;
use pdf::PopplerTesseract;
use std::sync::Arc;
use utils::AppError;

/// Web service extracting and sectioning pathology report PDFs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Language passed to the OCR engine
    #[arg(long, default_value = "eng")]
    ocr_language: String,

    /// Resolution in DPI used when rasterizing pages for OCR
    #[arg(long, default_value_t = 150)]
    ocr_dpi: u32,

    /// Path to the pdftoppm binary (resolved via PATH by default)
    #[arg(long, default_value = "pdftoppm")]
    pdftoppm_path: String,

    /// Path to the tesseract binary (resolved via PATH by default)
    #[arg(long, default_value = "tesseract")]
    tesseract_path: String,

    /// Maximum accepted upload size in MiB
    #[arg(long, default_value_t = 25)]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting with args: {:?}", args);

    if args.ocr_dpi == 0 {
        return Err(AppError::Config("--ocr-dpi must be greater than zero".to_string()));
    }
    if args.max_upload_mb == 0 {
        return Err(AppError::Config("--max-upload-mb must be greater than zero".to_string()));
    }

    // 3. Wire up the extraction pipeline
    let ocr = PopplerTesseract::new(
        args.pdftoppm_path,
        args.tesseract_path,
        args.ocr_language,
        args.ocr_dpi,
    );
    let state = Arc::new(web::AppState::new(
        TextExtractor::new(Box::new(ocr)),
        SectionSplitter::new(),
        args.max_upload_mb * 1024 * 1024,
    ));

    // 4. Serve until shutdown
    web::serve(&args.bind, state).await
}
