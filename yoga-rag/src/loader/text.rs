//! Plain text extraction.

use std::fs;
use std::path::Path;

use crate::document::RawDocument;
use crate::error::{RagError, Result};

/// Read the whole file as one unit.
pub(crate) fn extract(path: &Path) -> Result<Vec<RawDocument>> {
    let text = fs::read_to_string(path).map_err(|e| RagError::LoaderError {
        path: path.display().to_string(),
        message: format!("failed to read text file: {e}"),
    })?;
    Ok(vec![RawDocument::new(path.display().to_string(), text)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_full_text_as_single_unit() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("poses.txt");
        fs::write(&path, "First paragraph.\n\nSecond paragraph.").unwrap();

        let docs = extract(&path).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "First paragraph.\n\nSecond paragraph.");
        assert_eq!(docs[0].page, None);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();

        assert!(matches!(extract(&path), Err(RagError::LoaderError { .. })));
    }
}
