//! Loading source files into [`RawDocument`]s.
//!
//! Files are recognized by extension through [`DocumentKind`], and each kind
//! has its own extractor:
//!
//! - [`DocumentKind::Pdf`]: one unit per page (lopdf)
//! - [`DocumentKind::Docx`]: one unit per explicit page break (zip + XML)
//! - [`DocumentKind::Txt`]: the whole file as a single unit
//!
//! A file that fails to extract is logged and skipped; it never aborts the
//! rest of the directory.

mod docx;
mod pdf;
mod text;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::document::RawDocument;
use crate::error::{RagError, Result};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word processing document.
    Docx,
    /// Plain UTF-8 text.
    Txt,
}

impl DocumentKind {
    /// Recognize a file by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Extract the text units of `path` with the extractor for this kind.
    pub fn extract(self, path: &Path) -> Result<Vec<RawDocument>> {
        match self {
            Self::Pdf => pdf::extract(path),
            Self::Docx => docx::extract(path),
            Self::Txt => text::extract(path),
        }
    }
}

/// A file that was recognized but could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// The file that was skipped.
    pub path: PathBuf,
    /// Why extraction failed.
    pub reason: String,
}

/// Everything produced by one pass over the source directory.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Extracted units in file-name order, then page order.
    pub documents: Vec<RawDocument>,
    /// Files whose extraction failed.
    pub skipped: Vec<SkippedFile>,
}

/// Loads every supported file directly inside a source directory.
///
/// # Example
///
/// ```rust,ignore
/// use yoga_rag::DirectoryLoader;
///
/// let loader = DirectoryLoader::new("uploaded_documents");
/// let documents = loader.load()?;
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    /// Create a loader for the directory at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The source directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load all supported files, skipping the ones that fail.
    ///
    /// A missing directory is created and yields no documents.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Io`] only if the directory itself cannot be
    /// created.
    pub fn load(&self) -> Result<Vec<RawDocument>> {
        self.load_report().map(|report| report.documents)
    }

    /// Like [`load`](Self::load), but also reports the files that were skipped.
    pub fn load_report(&self) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        if !self.ensure_root()? {
            info!(root = %self.root.display(), "created empty source directory");
            return Ok(report);
        }

        for path in self.entries() {
            let Some(kind) = DocumentKind::from_path(&path) else {
                debug!(path = %path.display(), "skipping unsupported file");
                continue;
            };
            match kind.extract(&path) {
                Ok(units) => {
                    debug!(path = %path.display(), units = units.len(), "extracted file");
                    report.documents.extend(units);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to extract file, skipping");
                    report.skipped.push(SkippedFile { path, reason: e.to_string() });
                }
            }
        }

        info!(
            root = %self.root.display(),
            documents = report.documents.len(),
            skipped = report.skipped.len(),
            "loaded source directory"
        );
        Ok(report)
    }

    /// List the supported files currently in the source directory.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        Ok(self.entries().filter(|p| DocumentKind::from_path(p).is_some()).collect())
    }

    /// Copy files into the source directory, overwriting files of the same name.
    ///
    /// The new files take effect on the next rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LoaderError`] for an unsupported extension and
    /// [`RagError::Io`] if a copy fails.
    pub fn import(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        self.ensure_root()?;
        let mut copied = Vec::with_capacity(files.len());
        for file in files {
            let name = match (DocumentKind::from_path(file), file.file_name()) {
                (Some(_), Some(name)) => name,
                _ => {
                    return Err(RagError::LoaderError {
                        path: file.display().to_string(),
                        message: "unsupported file type (expected pdf, docx or txt)".to_string(),
                    });
                }
            };
            let dest = self.root.join(name);
            fs::copy(file, &dest)?;
            info!(from = %file.display(), to = %dest.display(), "imported file");
            copied.push(dest);
        }
        Ok(copied)
    }

    /// Create the directory if needed. Returns `false` if it had to be created.
    fn ensure_root(&self) -> Result<bool> {
        if self.root.is_dir() {
            return Ok(true);
        }
        fs::create_dir_all(&self.root)?;
        Ok(false)
    }

    fn entries(&self) -> impl Iterator<Item = PathBuf> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "failed to read directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_extensions_case_insensitively() {
        assert_eq!(DocumentKind::from_path(Path::new("a.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("b.docx")), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_path(Path::new("c.txt")), Some(DocumentKind::Txt));
        assert_eq!(DocumentKind::from_path(Path::new("d.md")), None);
        assert_eq!(DocumentKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn missing_directory_is_created_and_empty() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("uploaded_documents");
        let loader = DirectoryLoader::new(&root);

        let docs = loader.load().unwrap();
        assert!(docs.is_empty());
        assert!(root.is_dir());
    }

    #[test]
    fn loads_text_and_skips_unsupported() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("b.txt"), "Mountain pose grounds the feet.").unwrap();
        fs::write(temp.path().join("a.txt"), "Child's pose rests the back.").unwrap();
        fs::write(temp.path().join("notes.md"), "# ignored").unwrap();

        let docs = DirectoryLoader::new(temp.path()).load().unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].source.ends_with("a.txt"));
        assert!(docs[1].source.ends_with("b.txt"));
        assert!(docs.iter().all(|d| d.page.is_none()));
    }

    #[test]
    fn broken_file_does_not_abort_loading() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("broken.pdf"), b"not a pdf").unwrap();
        fs::write(temp.path().join("ok.txt"), "Tree pose builds balance.").unwrap();

        let report = DirectoryLoader::new(temp.path()).load_report().unwrap();
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("broken.pdf"));
    }

    #[test]
    fn import_copies_supported_files_only() {
        let temp = tempfile::tempdir().unwrap();
        let upload = temp.path().join("upload.txt");
        fs::write(&upload, "Warrior pose.").unwrap();
        let bad = temp.path().join("image.png");
        fs::write(&bad, [0u8; 4]).unwrap();

        let loader = DirectoryLoader::new(temp.path().join("docs"));
        let copied = loader.import(&[upload]).unwrap();
        assert_eq!(copied.len(), 1);
        assert_eq!(loader.list_files().unwrap().len(), 1);

        assert!(matches!(loader.import(&[bad]), Err(RagError::LoaderError { .. })));
    }
}
