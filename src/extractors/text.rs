// src/extractors/text.rs

// --- Imports ---
use crate::pdf::{OcrEngine, ReportPdf};

// --- Constants ---
/// Returned as the whole result when no page produced any text.
pub const NO_TEXT_SENTINEL: &str = "No text extracted from the PDF.";
/// Inline placeholder when OCR ran but recognized nothing.
pub const OCR_EMPTY_SENTINEL: &str = "No readable text found via OCR.";

// --- Data Structures ---
/// How a single page's text was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Text came straight from the PDF text layer.
    Native(String),
    /// Text recovered by rasterizing the page and running OCR.
    Ocr(String),
    /// OCR ran but recognized nothing readable.
    OcrEmpty,
    /// Rasterization or recognition failed; the message is embedded
    /// inline in the combined output instead of aborting the run.
    OcrFailed(String),
}

/// Combined extraction result for one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub full_text: String,
    /// One informational warning per page that fell back to OCR.
    pub warnings: Vec<String>,
    pub pages_total: usize,
    pub pages_native: usize,
    pub pages_ocr: usize,
    pub pages_unreadable: usize,
}

impl ExtractionReport {
    fn tally(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Native(_) => self.pages_native += 1,
            PageOutcome::Ocr(_) => self.pages_ocr += 1,
            PageOutcome::OcrEmpty | PageOutcome::OcrFailed(_) => self.pages_unreadable += 1,
        }
    }
}

// --- Main Extractor Structure ---
/// Walks the document page by page: the native text layer when it has
/// content, OCR over the rendered page otherwise. Failures degrade per
/// page; the run itself never aborts once the document is open.
pub struct TextExtractor {
    ocr: Box<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(ocr: Box<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    pub fn extract(&self, pdf: &ReportPdf) -> ExtractionReport {
        let mut report = ExtractionReport::default();
        let pages = pdf.page_numbers();
        report.pages_total = pages.len();

        let mut combined = String::new();
        for page_number in pages {
            let outcome = self.extract_page(pdf, page_number, &mut report.warnings);
            report.tally(&outcome);
            push_page(&mut combined, page_number, &outcome);
        }

        tracing::info!(
            "Extraction finished: {} pages ({} native, {} OCR, {} unreadable)",
            report.pages_total,
            report.pages_native,
            report.pages_ocr,
            report.pages_unreadable
        );

        report.full_text = if combined.trim().is_empty() {
            NO_TEXT_SENTINEL.to_string()
        } else {
            combined
        };
        report
    }

    fn extract_page(
        &self,
        pdf: &ReportPdf,
        page_number: u32,
        warnings: &mut Vec<String>,
    ) -> PageOutcome {
        // A text-layer error on one page is treated like an empty layer:
        // the page still gets its OCR chance.
        let native = pdf.page_text(page_number).unwrap_or_else(|e| {
            tracing::debug!("Text layer unreadable on page {}: {}", page_number, e);
            String::new()
        });

        if !native.trim().is_empty() {
            return PageOutcome::Native(native);
        }

        let warning = format!("No text found on page {}. Trying OCR...", page_number);
        tracing::warn!("{}", warning);
        warnings.push(warning);

        match self.ocr.recognize_page(pdf.path(), page_number) {
            Ok(text) if text.trim().is_empty() => PageOutcome::OcrEmpty,
            Ok(text) => PageOutcome::Ocr(text),
            Err(e) => {
                tracing::error!("OCR failed on page {}: {}", page_number, e);
                PageOutcome::OcrFailed(e.to_string())
            }
        }
    }
}

/// Appends one page's marker line and content. Every variant appends:
/// the combined output records what happened on each page, failures
/// included.
fn push_page(out: &mut String, page_number: u32, outcome: &PageOutcome) {
    match outcome {
        PageOutcome::Native(text) => {
            out.push_str(&format!("\n--- Page {} ---\n", page_number));
            out.push_str(text);
        }
        PageOutcome::Ocr(text) => {
            out.push_str(&format!("\n--- OCR from Page {} ---\n", page_number));
            out.push_str(text);
        }
        PageOutcome::OcrEmpty => {
            out.push_str(&format!("\n--- OCR from Page {} ---\n", page_number));
            out.push_str(OCR_EMPTY_SENTINEL);
        }
        PageOutcome::OcrFailed(message) => {
            out.push_str(&format!("\n--- OCR from Page {} ---\n", page_number));
            out.push_str(&format!("Error during OCR extraction: {}", message));
        }
    }
}
