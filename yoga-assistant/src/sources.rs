//! The "Sources Used" footer.

use std::collections::HashSet;

use yoga_rag::{SearchResult, SourceRef};

/// Distinct sources of `results`, in first-seen order.
pub fn collect_sources(results: &[SearchResult]) -> Vec<SourceRef> {
    let mut seen = HashSet::new();
    results
        .iter()
        .map(|r| r.chunk.source_ref())
        .filter(|source| seen.insert(source.clone()))
        .collect()
}

/// Render the footer appended to an answer. Empty when there are no sources.
pub fn sources_section(sources: &[SourceRef]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let mut section = String::from("\n\n---\n**Sources Used:**\n");
    for source in sources {
        section.push_str(&format!("- 📖 {source}\n"));
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoga_rag::Chunk;

    fn hit(source: &str, page: Option<u32>) -> SearchResult {
        SearchResult {
            id: format!("{source}-{page:?}"),
            chunk: Chunk { text: "t".into(), source: source.into(), page, chunk_index: 0 },
            score: 1.0,
        }
    }

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let sources = collect_sources(&[
            hit("lib/b.pdf", Some(2)),
            hit("lib/a.txt", None),
            hit("other/b.pdf", Some(2)),
            hit("lib/b.pdf", Some(3)),
        ]);
        let rendered: Vec<String> = sources.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["b.pdf (Page 2)", "a.txt (Page N/A)", "b.pdf (Page 3)"]);
    }

    #[test]
    fn section_format() {
        let section = sources_section(&[SourceRef::from_path("poses.txt", None)]);
        assert_eq!(section, "\n\n---\n**Sources Used:**\n- 📖 poses.txt (Page N/A)\n");
    }

    #[test]
    fn no_sources_no_section() {
        assert!(sources_section(&[]).is_empty());
    }
}
