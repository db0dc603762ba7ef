//! DOCX text extraction.
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`.
//! Explicit page breaks split the body into pages.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::RawDocument;
use crate::error::{RagError, Result};

const DOCUMENT_XML: &str = "word/document.xml";

static PAGE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<w:br\b[^>]*w:type="page"[^>]*/>"#).expect("valid page break pattern")
});
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</w:p>|<w:br\b[^>]*/>|<w:cr\b[^>]*/>").expect("valid break pattern"));
static TAB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:tab\b[^>]*/>").expect("valid tab pattern"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

pub(crate) fn extract(path: &Path) -> Result<Vec<RawDocument>> {
    let loader_error = |message: String| RagError::LoaderError {
        path: path.display().to_string(),
        message,
    };

    let file = File::open(path).map_err(|e| loader_error(format!("failed to open DOCX: {e}")))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| loader_error(format!("not a DOCX archive: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| loader_error(format!("missing {DOCUMENT_XML}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| loader_error(format!("failed to read {DOCUMENT_XML}: {e}")))?;

    let source = path.display().to_string();
    Ok(split_pages(&xml)
        .into_iter()
        .zip(1u32..)
        .filter(|(text, _)| !text.is_empty())
        .map(|(text, page)| RawDocument::new(source.clone(), text).with_page(page))
        .collect())
}

/// Split document XML at explicit page breaks and convert each page to text.
fn split_pages(xml: &str) -> Vec<String> {
    PAGE_BREAK.split(xml).map(xml_to_text).collect()
}

fn xml_to_text(xml: &str) -> String {
    let text = LINE_BREAK.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = TAG.replace_all(&text, "");
    unescape(&text).trim().to_string()
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
