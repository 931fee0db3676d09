// src/pdf/ocr.rs
use crate::utils::error::OcrError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Recognizes the text of a single PDF page from its rendered image.
///
/// The extractor only needs this one operation, and keeping it behind a
/// trait lets tests substitute canned engines for the external tools.
pub trait OcrEngine: Send + Sync {
    fn recognize_page(&self, pdf_path: &Path, page_number: u32) -> Result<String, OcrError>;
}

/// OCR via external tools: `pdftoppm` (Poppler) rasterizes the page,
/// `tesseract` recognizes the result. Both are resolved through PATH
/// unless explicit paths are configured.
pub struct PopplerTesseract {
    pdftoppm_path: String,
    tesseract_path: String,
    language: String,
    render_dpi: u32,
}

impl PopplerTesseract {
    pub fn new(
        pdftoppm_path: String,
        tesseract_path: String,
        language: String,
        render_dpi: u32,
    ) -> Self {
        Self {
            pdftoppm_path,
            tesseract_path,
            language,
            render_dpi,
        }
    }

    fn render_page(&self, pdf_path: &Path, page_number: u32, scratch: &Path) -> Result<PathBuf, OcrError> {
        let prefix = scratch.join(format!("page_{}", page_number));

        let rendered = Command::new(&self.pdftoppm_path)
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg("-r")
            .arg(self.render_dpi.to_string())
            .arg("-png")
            .arg(pdf_path)
            .arg(&prefix)
            .output()
            .map_err(|e| {
                OcrError::Render(format!("failed to start {}: {}", self.pdftoppm_path, e))
            })?;

        if !rendered.status.success() {
            return Err(OcrError::Render(format!(
                "{} exited with {} on page {}: {}",
                self.pdftoppm_path,
                rendered.status,
                page_number,
                one_line(&String::from_utf8_lossy(&rendered.stderr))
            )));
        }

        // pdftoppm zero-pads the page suffix based on the document's page
        // count, so the exact file name is not predictable. The scratch
        // directory holds this render only; take whatever PNG appeared.
        find_rendered_image(scratch).ok_or_else(|| {
            OcrError::Render(format!(
                "{} produced no image for page {}",
                self.pdftoppm_path, page_number
            ))
        })
    }
}

impl Default for PopplerTesseract {
    fn default() -> Self {
        Self::new(
            "pdftoppm".to_string(),
            "tesseract".to_string(),
            "eng".to_string(),
            150,
        )
    }
}

impl OcrEngine for PopplerTesseract {
    fn recognize_page(&self, pdf_path: &Path, page_number: u32) -> Result<String, OcrError> {
        // Scratch dir is removed when `scratch` drops, on every exit path.
        let scratch = tempfile::tempdir()?;
        let image = self.render_page(pdf_path, page_number, scratch.path())?;

        let recognized = Command::new(&self.tesseract_path)
            .arg(&image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| {
                OcrError::Recognize(format!("failed to start {}: {}", self.tesseract_path, e))
            })?;

        if !recognized.status.success() {
            return Err(OcrError::Recognize(format!(
                "{} exited with {} on page {}: {}",
                self.tesseract_path,
                recognized.status,
                page_number,
                one_line(&String::from_utf8_lossy(&recognized.stderr))
            )));
        }

        Ok(String::from_utf8(recognized.stdout)?)
    }
}

fn find_rendered_image(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| path.extension().is_some_and(|ext| ext == "png"))
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
