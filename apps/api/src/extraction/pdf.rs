//! PDF text extraction wrapper around the `pdf-extract` crate.
//!
//! Decoding never errors out to the caller: corrupted, encrypted or
//! image-only documents come back as an empty string and the pipeline
//! reports an extraction failure.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

/// Turns a document byte stream into plain text, pages separated by newlines.
pub trait DocumentTextSource: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> String;
}

/// `pdf-extract` backed text source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl DocumentTextSource for PdfTextSource {
    fn extract_text(&self, bytes: &[u8]) -> String {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));

        match result {
            Ok(Ok(text)) => {
                let text = normalize_page_breaks(&text);
                debug!("Extracted {} chars from PDF ({} bytes)", text.len(), bytes.len());
                text
            }
            Ok(Err(e)) => {
                warn!("Error reading PDF: {e:?}");
                String::new()
            }
            Err(_) => {
                warn!("PDF decoder panicked on malformed input");
                String::new()
            }
        }
    }
}

/// Form feeds mark page boundaries in the decoder output; the section
/// extractors only understand newlines.
fn normalize_page_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace(['\u{000C}', '\r'], "\n")
}
