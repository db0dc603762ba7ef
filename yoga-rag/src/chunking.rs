//! Splitting loaded documents into bounded, overlapping chunks.
//!
//! [`RecursiveChunker`] looks for the most natural boundary first (paragraphs,
//! then lines, then sentences, then words) and only falls back to hard
//! character cuts when a segment has no usable separator. All sizes are in
//! characters, so multi-byte text is never cut inside a code point.

use std::collections::VecDeque;

use crate::config::RagConfig;
use crate::document::{Chunk, RawDocument};

/// A strategy for splitting documents into chunks.
pub trait Chunker: Send + Sync {
    /// Split one document into chunks.
    ///
    /// Returns an empty `Vec` if the document has no non-whitespace text.
    fn chunk(&self, document: &RawDocument) -> Vec<Chunk>;

    /// Split a sequence of documents, preserving input order.
    fn split(&self, documents: &[RawDocument]) -> Vec<Chunk> {
        documents.iter().flat_map(|doc| self.chunk(doc)).collect()
    }
}

/// Splits text hierarchically by a list of preferred separators, merging
/// neighbouring pieces up to `chunk_size` with `chunk_overlap` carried over.
///
/// # Example
///
/// ```rust,ignore
/// use yoga_rag::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(1000, 200);
/// let chunks = chunker.split(&documents);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveChunker {
    /// Create a chunker with the default separators.
    ///
    /// `chunk_size` is clamped to at least one character and `chunk_overlap`
    /// to less than `chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let defaults = RagConfig::default().separators;
        Self::with_separators(chunk_size, chunk_overlap, defaults)
    }

    /// Create a chunker with a custom separator order. Empty separators are ignored.
    pub fn with_separators(chunk_size: usize, chunk_overlap: usize, separators: Vec<String>) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
            separators: separators.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    /// Create a chunker from a validated [`RagConfig`].
    pub fn from_config(config: &RagConfig) -> Self {
        Self::with_separators(config.chunk_size, config.chunk_overlap, config.separators.clone())
    }

    /// Split raw text into chunk strings.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces = if char_len(text) <= self.chunk_size {
            vec![text.to_string()]
        } else {
            self.split_recursive(text, &self.separators)
        };
        pieces
            .into_iter()
            .map(|piece| piece.trim().to_string())
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let Some(pos) = separators.iter().position(|sep| text.contains(sep.as_str())) else {
            return split_by_size(text, self.chunk_size, self.chunk_overlap);
        };
        let separator = separators[pos].as_str();
        let remaining = &separators[pos + 1..];

        let mut chunks = Vec::new();
        let mut pending: Vec<&str> = Vec::new();
        for segment in split_keeping_separator(text, separator) {
            if char_len(segment) <= self.chunk_size {
                pending.push(segment);
            } else {
                chunks.extend(self.merge(&pending));
                pending.clear();
                chunks.extend(self.split_recursive(segment, remaining));
            }
        }
        chunks.extend(self.merge(&pending));
        chunks
    }

    /// Merge small segments into chunks of at most `chunk_size` characters,
    /// starting each new chunk with up to `chunk_overlap` characters of the
    /// previous one.
    fn merge(&self, segments: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0;

        for segment in segments {
            let len = char_len(segment);
            if total + len > self.chunk_size && !window.is_empty() {
                chunks.push(window.iter().map(|(s, _)| *s).collect::<String>());
                while total > self.chunk_overlap || (total > 0 && total + len > self.chunk_size) {
                    match window.pop_front() {
                        Some((_, dropped)) => total -= dropped,
                        None => break,
                    }
                }
            }
            window.push_back((segment, len));
            total += len;
        }

        if !window.is_empty() {
            chunks.push(window.iter().map(|(s, _)| *s).collect::<String>());
        }
        chunks
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, document: &RawDocument) -> Vec<Chunk> {
        self.split_text(&document.text)
            .into_iter()
            .enumerate()
            .map(|(chunk_index, text)| Chunk {
                text,
                source: document.source.clone(),
                page: document.page,
                chunk_index,
            })
            .collect()
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split text at a separator while keeping the separator attached to the preceding segment.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        result.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// Hard character cuts with overlap, used when no separator applies.
fn split_by_size(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let boundaries: Vec<usize> =
        text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
    let char_count = boundaries.len() - 1;
    if char_count == 0 {
        return Vec::new();
    }

    let step = chunk_size.saturating_sub(chunk_overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + chunk_size).min(char_count);
        chunks.push(text[boundaries[start]..boundaries[end]].to_string());
        if end == char_count {
            break;
        }
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> RawDocument {
        RawDocument::new("docs/poses.txt", text)
    }

    #[test]
    fn short_document_yields_one_chunk() {
        let text = "Downward dog stretches the spine and strengthens arms.";
        let chunks = RecursiveChunker::new(1000, 200).chunk(&doc(text));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].source, "docs/poses.txt");
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(RecursiveChunker::new(100, 10).chunk(&doc("   \n\n ")).is_empty());
    }

    #[test]
    fn prefers_paragraph_boundaries() {
        let text = "Mountain pose is the base of standing poses.\n\nTree pose builds balance on one leg.";
        let chunks = RecursiveChunker::new(50, 0).split_text(text);
        assert_eq!(
            chunks,
            vec![
                "Mountain pose is the base of standing poses.".to_string(),
                "Tree pose builds balance on one leg.".to_string(),
            ]
        );
    }

    #[test]
    fn overlap_carries_trailing_words() {
        let text = "one two three four five six seven eight nine ten";
        let chunks = RecursiveChunker::new(20, 10).split_text(text);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let last_word = pair[0].split(' ').next_back().unwrap();
            assert!(pair[1].contains(last_word), "{:?} should overlap {:?}", pair[1], pair[0]);
        }
        assert!(chunks.iter().all(|c| c.chars().count() <= 20));
    }

    #[test]
    fn hard_cuts_respect_char_boundaries() {
        let text = "ॐ".repeat(25);
        let chunks = RecursiveChunker::new(10, 2).split_text(&text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks[0].chars().count(), 10);
        assert_eq!(chunks.last().unwrap().chars().last(), Some('ॐ'));
    }

    #[test]
    fn split_keeps_page_and_order() {
        let docs = vec![
            RawDocument::new("a.pdf", "Page one text.").with_page(1),
            RawDocument::new("a.pdf", "Page two text.").with_page(2),
        ];
        let chunks = RecursiveChunker::new(100, 10).split(&docs);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page, Some(1));
        assert_eq!(chunks[1].page, Some(2));
    }

    #[test]
    fn split_by_size_covers_whole_text() {
        let chunks = split_by_size("abcdefghij", 4, 1);
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
    }
}
