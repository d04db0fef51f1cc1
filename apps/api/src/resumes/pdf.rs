use anyhow::Context;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Upper bound for uploaded PDFs.
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts plain text from an uploaded PDF. Parsing runs on the blocking pool.
pub async fn extract_resume_text(bytes: Bytes) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if bytes.len() > MAX_PDF_BYTES {
        return Err(AppError::Validation(format!(
            "PDF exceeds the {} MB limit",
            MAX_PDF_BYTES / (1024 * 1024)
        )));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation("Uploaded file is not a PDF".to_string()));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .context("PDF extraction task panicked")?
        .map_err(|e| {
            tracing::warn!("PDF text extraction failed: {e:?}");
            AppError::Validation("Could not read text from the PDF".to_string())
        })?;

    let text = normalize_whitespace(&text);
    if text.is_empty() {
        tracing::warn!("PDF of {size} bytes contained no extractable text");
        return Err(AppError::Validation(
            "The PDF has no extractable text. Scanned documents are not supported".to_string(),
        ));
    }

    info!("Extracted {} characters from a {size}-byte PDF", text.len());
    Ok(text)
}

/// Collapses runs of blank lines and trailing spaces left by PDF layout.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
