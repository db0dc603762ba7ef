//! Data types for loaded documents, chunks, and search results.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One extracted text unit of a source file.
///
/// PDF and DOCX files produce one `RawDocument` per page; flat text files
/// produce a single unit with no page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawDocument {
    /// Path of the file the text was extracted from.
    pub source: String,
    /// The extracted text.
    pub text: String,
    /// 1-based page number, when the format has pages.
    ///
    /// The first page of a PDF is `Page 1` in citations, never `Page 0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl RawDocument {
    /// Create a unit without page information.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self { source: source.into(), text: text.into(), page: None }
    }

    /// Attach a page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// A bounded segment of a [`RawDocument`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// Path of the originating file.
    pub source: String,
    /// Page of the originating unit, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Position of this chunk within its unit, starting at zero.
    pub chunk_index: usize,
}

impl Chunk {
    /// The human-readable provenance of this chunk.
    pub fn source_ref(&self) -> SourceRef {
        SourceRef::from_path(&self.source, self.page)
    }
}

/// A chunk as persisted in a vector store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexedChunk {
    /// Unique identifier assigned at indexing time.
    pub id: String,
    /// The chunk payload.
    pub chunk: Chunk,
    /// The vector embedding of the chunk text.
    pub embedding: Vec<f32>,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier of the stored entry.
    pub id: String,
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// The outcome of one retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// The query text that was embedded.
    pub query: String,
    /// Results ordered best-first.
    pub results: Vec<SearchResult>,
    /// The number of results requested.
    pub k: usize,
}

impl RetrievalResult {
    /// An empty result for `query`.
    pub fn empty(query: impl Into<String>, k: usize) -> Self {
        Self { query: query.into(), results: Vec::new(), k }
    }

    /// Returns `true` if nothing was retrieved.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A file name and optional page, as shown to the reader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourceRef {
    /// File name without directories.
    pub name: String,
    /// Page number, if the source has pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl SourceRef {
    /// Build a reference from a source path, keeping only the file name.
    pub fn from_path(source: &str, page: Option<u32>) -> Self {
        let name = Path::new(source)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| if source.is_empty() { "Unknown".to_string() } else { source.to_string() });
        Self { name, page }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "{} (Page {page})", self.name),
            None => write!(f, "{} (Page N/A)", self.name),
        }
    }
}
