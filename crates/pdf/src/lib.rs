//! # bulletin-pdf: PDF Text Extraction
//!
//! Pulls the raw text out of a PDF so it can be handed to the extraction
//! call. Layout is not reconstructed; text-showing operators are emitted in
//! content-stream order, line breaks become `\n` and pages are joined with
//! `\n`.

use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum PdfTextError {
    #[error("Failed to read PDF file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse PDF content: {0}")]
    Parse(String),
}

// --- Core Extraction Logic ---

/// Extracts text from all pages of a PDF synchronously.
pub fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<String, PdfTextError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| PdfTextError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let mut pages = Vec::with_capacity(file.num_pages() as usize);

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| PdfTextError::Parse(e.to_string()))?;
        let mut page_text = String::new();
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| PdfTextError::Parse(e.to_string()))?;
            for op in operations.iter() {
                match op {
                    Op::TextDraw { text } => page_text.push_str(&text.to_string_lossy()),
                    Op::TextDrawAdjusted { array } => {
                        for item in array {
                            if let TextDrawAdjusted::Text(text) = item {
                                page_text.push_str(&text.to_string_lossy());
                            }
                        }
                    }
                    Op::TextNewline => page_text.push('\n'),
                    _ => {}
                }
            }
        }
        debug!("Page {} yielded {} chars.", page_num + 1, page_text.len());
        pages.push(page_text);
    }

    Ok(pages.join("\n"))
}

/// Reads a PDF from disk and extracts its text.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_text_from_path(path: impl AsRef<Path>) -> Result<String, PdfTextError> {
    let path = path.as_ref();
    let pdf_data = std::fs::read(path).map_err(|source| PdfTextError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("Read {} bytes from '{}'.", pdf_data.len(), path.display());
    extract_text_from_pdf(&pdf_data)
}
