//! DOCX text extraction
//!
//! A .docx file is a zip archive; the body lives in `word/document.xml` as
//! `<w:p>` paragraphs made of `<w:t>` text runs. Each paragraph becomes one
//! line of output.

use std::io::{Cursor, Read};

use lazy_static::lazy_static;
use regex::Regex;
use zip::ZipArchive;

use crate::ExtractError;

const DOCUMENT_XML: &str = "word/document.xml";

lazy_static! {
    /// Text runs, tabs, breaks and paragraph ends, in document order
    static ref DOCX_TOKEN: Regex = Regex::new(
        r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:(?:br|cr)(?:\s[^>]*)?/>|</w:p>|<w:p\s*/>"
    )
    .unwrap();
}

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::InvalidDocx(e.to_string()))?;

    let mut file = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractError::InvalidDocx(format!("{}: {}", DOCUMENT_XML, e)))?;

    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| ExtractError::Extraction(e.to_string()))?;

    Ok(document_xml_to_text(&xml))
}

/// Flatten WordprocessingML into text, one line per paragraph
pub fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::new();

    for caps in DOCX_TOKEN.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            text.push_str(&unescape_xml(run.as_str()));
            continue;
        }

        let token = caps.get(0).map_or("", |m| m.as_str());
        if token.starts_with("<w:tab") {
            text.push('\t');
        } else {
            text.push('\n');
        }
    }

    text
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_XML, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<w:document><w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>ARTICLE 1. RENT</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">Tenant shall pay </w:t></w:r><w:r><w:t>$1,500 &amp; fees.</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_paragraphs_become_lines() {
        let text = document_xml_to_text(BODY);
        assert_eq!(
            text,
            "ARTICLE 1. RENT\nTenant shall pay $1,500 & fees.\n\nA\tB\nC\n"
        );
    }

    #[test]
    fn test_unescape_xml() {
        assert_eq!(unescape_xml("&lt;b&gt; &quot;x&quot; &apos;y&apos; &amp;amp;"), "<b> \"x\" 'y' &amp;");
    }

    #[test]
    fn test_extracts_from_zip_container() {
        let bytes = docx_bytes(BODY);
        let text = extract_docx_text(&bytes).unwrap();
        assert!(text.starts_with("ARTICLE 1. RENT\n"));
    }

    #[test]
    fn test_missing_document_xml_is_invalid() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = extract_docx_text(&bytes);
        assert!(matches!(result, Err(ExtractError::InvalidDocx(_))));
    }
}
