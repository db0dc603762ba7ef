//! Property tests for in-memory vector store search ordering.

use yoga_rag::document::{Chunk, IndexedChunk};
use yoga_rag::inmemory::InMemoryVectorStore;
use yoga_rag::vectorstore::VectorStore;
use proptest::prelude::*;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

fn entries_from(embeddings: Vec<Vec<f32>>) -> Vec<IndexedChunk> {
    embeddings
        .into_iter()
        .enumerate()
        .map(|(i, embedding)| IndexedChunk {
            id: format!("chunk-{i}"),
            chunk: Chunk {
                text: format!("chunk text {i}"),
                source: "poses.txt".to_string(),
                page: None,
                chunk_index: i,
            },
            embedding,
        })
        .collect()
}

/// *For any* set of entries stored in an InMemoryVectorStore, searching with
/// a query embedding returns results ordered by descending cosine similarity,
/// and the number of results is at most `top_k`.
mod prop_inmemory_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let count = embeddings.len();
            let rt = tokio::runtime::Runtime::new().unwrap();
            let results = rt.block_on(async {
                let store = InMemoryVectorStore::new();
                store.insert(entries_from(embeddings)).await.unwrap();
                store.search(&query, top_k).await.unwrap()
            });

            prop_assert!(results.len() <= top_k);
            prop_assert_eq!(results.len(), top_k.min(count));

            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }

        #[test]
        fn stored_vector_is_its_own_best_match(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let target = pick.index(embeddings.len());
            let query = embeddings[target].clone();
            let rt = tokio::runtime::Runtime::new().unwrap();
            let results = rt.block_on(async {
                let store = InMemoryVectorStore::new();
                store.insert(entries_from(embeddings)).await.unwrap();
                store.search(&query, 1).await.unwrap()
            });

            prop_assert_eq!(results.len(), 1);
            prop_assert!((results[0].score - 1.0).abs() < 1e-4);
        }
    }
}
