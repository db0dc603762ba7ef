//! PDF text extraction using lopdf.

use std::path::Path;

use tracing::{debug, warn};

use crate::document::RawDocument;
use crate::error::{RagError, Result};

/// Extract one unit per page. Pages without text are left out.
pub(crate) fn extract(path: &Path) -> Result<Vec<RawDocument>> {
    let doc = lopdf::Document::load(path).map_err(|e| RagError::LoaderError {
        path: path.display().to_string(),
        message: format!("failed to load PDF: {e}"),
    })?;

    let source = path.display().to_string();
    let pages = doc.get_pages();
    debug!(path = %source, page_count = pages.len(), "extracting text from PDF");

    let mut units = Vec::with_capacity(pages.len());
    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                units.push(RawDocument::new(source.clone(), text).with_page(*page_num));
            }
            Err(e) => {
                warn!(path = %source, page = page_num, error = %e, "failed to extract page, skipping");
            }
        }
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn first_page_is_numbered_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequence.pdf");
        write_pdf(&path, &["Mountain pose", "Chair pose"]);

        let docs = extract(&path).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].page, Some(1));
        assert!(docs[0].text.contains("Mountain pose"));
        assert_eq!(docs[1].page, Some(2));
        assert!(docs[1].text.contains("Chair pose"));
    }

    #[test]
    fn unreadable_pdf_is_a_loader_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();
        assert!(matches!(extract(&path), Err(RagError::LoaderError { .. })));
    }
}
