//! PDF text extraction

use pdf_extract::extract_text_from_mem;

use crate::ExtractError;

/// Extract the text of every page, pages joined by newlines
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let raw_text = extract_text_from_mem(bytes).map_err(|e| {
        let error_msg = e.to_string().to_lowercase();

        if error_msg.contains("encrypted") || error_msg.contains("password") {
            ExtractError::PasswordProtected
        } else if error_msg.contains("invalid")
            || error_msg.contains("malformed")
            || error_msg.contains("corrupt")
        {
            ExtractError::InvalidPdf(e.to_string())
        } else {
            ExtractError::Extraction(e.to_string())
        }
    })?;

    Ok(join_pages(&raw_text))
}

/// pdf-extract separates pages with form feeds; emit each page followed by a newline
fn join_pages(raw_text: &str) -> String {
    raw_text
        .split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .fold(String::new(), |mut text, page| {
            text.push_str(page);
            text.push('\n');
            text
        })
}
