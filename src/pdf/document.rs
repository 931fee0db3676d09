// src/pdf/document.rs
use crate::utils::error::PdfError;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// An opened pathology report PDF.
///
/// Wraps the parsed document together with the path it was loaded from;
/// the OCR fallback rasterizes pages with an external tool and needs the
/// file on disk.
pub struct ReportPdf {
    doc: Document,
    path: PathBuf,
}

impl ReportPdf {
    /// Opens and parses a PDF from disk. Encrypted documents are
    /// rejected; nothing downstream can work with protected content.
    pub fn open(path: &Path) -> Result<Self, PdfError> {
        let doc = Document::load(path)?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        Ok(Self {
            doc,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Page numbers in document order, 1-based as keyed by the page tree.
    pub fn page_numbers(&self) -> Vec<u32> {
        // BTreeMap keys iterate sorted, which is document order here.
        self.doc.get_pages().keys().copied().collect()
    }

    /// Extracts the native text layer of a single page.
    pub fn page_text(&self, page_number: u32) -> Result<String, PdfError> {
        Ok(self.doc.extract_text(&[page_number])?)
    }
}
