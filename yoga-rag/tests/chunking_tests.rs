//! Property tests for chunk bounds and determinism.

use proptest::prelude::*;
use yoga_rag::{Chunker, RawDocument, RecursiveChunker};

fn arb_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[a-zA-Z]{1,12}".prop_map(|w| format!("{w} ")),
            Just(". ".to_string()),
            Just("\n".to_string()),
            Just("\n\n".to_string()),
            Just("ॐ ".to_string()),
        ],
        0..300,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn chunks_never_exceed_chunk_size(
        text in arb_text(),
        chunk_size in 10usize..200,
        overlap_ratio in 0.0f64..0.5,
    ) {
        let overlap = (chunk_size as f64 * overlap_ratio) as usize;
        let chunker = RecursiveChunker::new(chunk_size, overlap);
        for chunk in chunker.chunk(&RawDocument::new("doc.txt", text)) {
            prop_assert!(chunk.text.chars().count() <= chunk_size);
            prop_assert!(!chunk.text.trim().is_empty());
        }
    }

    #[test]
    fn splitting_is_deterministic(text in arb_text(), chunk_size in 10usize..200) {
        let chunker = RecursiveChunker::new(chunk_size, chunk_size / 5);
        let docs = vec![RawDocument::new("a.txt", text.clone()), RawDocument::new("b.txt", text)];
        prop_assert_eq!(chunker.split(&docs), chunker.split(&docs));
    }

    #[test]
    fn short_text_is_one_chunk(text in "[a-z ]{1,50}") {
        prop_assume!(!text.trim().is_empty());
        let chunks = RecursiveChunker::new(50, 10).chunk(&RawDocument::new("short.txt", text.clone()));
        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(&chunks[0].text, text.trim());
    }

    #[test]
    fn chunk_indexes_are_sequential(text in arb_text()) {
        let chunks = RecursiveChunker::new(40, 8).chunk(&RawDocument::new("doc.txt", text));
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.chunk_index, i);
        }
    }
}
