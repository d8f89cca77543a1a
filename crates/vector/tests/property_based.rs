//! Property-based tests for the best-match scan and the JSON payload format

#[cfg(test)]
mod property_tests {
    use funcsearch_vector::{math, FunctionCodePair, HasEmbedding, VectorCollection};
    use proptest::prelude::*;
    use proptest::sample::Index;

    /// Eighths in [-16, 16): exact in f32 and in JSON, so sums do not depend on order
    fn component() -> impl Strategy<Value = f32> {
        (-128i32..128).prop_map(|n| n as f32 / 8.0)
    }

    /// (dimension, record vectors with some forced duplicates, query)
    fn scan_input() -> impl Strategy<Value = (usize, Vec<Vec<f32>>, Vec<f32>)> {
        (1usize..6).prop_flat_map(|dim| {
            (
                Just(dim),
                prop::collection::vec(prop::collection::vec(component(), dim), 1..24),
                prop::collection::vec(any::<Index>(), 0..6),
                prop::collection::vec(component(), dim),
            )
                .prop_map(|(dim, mut vectors, duplicates, query)| {
                    for index in duplicates {
                        let copy = vectors[index.index(vectors.len())].clone();
                        vectors.push(copy);
                    }
                    (dim, vectors, query)
                })
        })
    }

    fn collection_of(dim: usize, vectors: &[Vec<f32>]) -> VectorCollection<FunctionCodePair> {
        let mut collection = VectorCollection::new(dim);
        collection.add_range(vectors.iter().enumerate().map(|(i, v)| {
            FunctionCodePair::new(i as i32, format!("function {}", i), "code").with_vector(v.clone())
        }));
        collection
    }

    /// Index of the first maximum of `scores`
    fn first_max(scores: &[f32]) -> usize {
        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = i;
            }
        }
        best
    }

    fn pair_strategy() -> impl Strategy<Value = FunctionCodePair> {
        (
            any::<i32>(),
            "\\PC*",
            "\\PC*",
            prop::option::of(prop::collection::vec(component(), 0..8)),
        )
            .prop_map(|(id, function, code, vector)| FunctionCodePair {
                id,
                function,
                code,
                function_vector: vector,
            })
    }

    // Property: dot-product scan returns the first record with the highest score
    proptest! {
        #[test]
        fn test_dot_product_returns_first_maximum((dim, vectors, query) in scan_input()) {
            let collection = collection_of(dim, &vectors);
            let scores: Vec<f32> = vectors
                .iter()
                .map(|v| math::dot_product(v, &query, dim).unwrap())
                .collect();
            let expected = first_max(&scores);

            let result = collection.find_by_dot_product(&query, |p| p.embedding()).unwrap();

            prop_assert_eq!(result.item.id, expected as i32);
            prop_assert_eq!(result.value, scores[expected]);
        }
    }

    // Property: Euclidean scan returns the first record at the smallest distance
    proptest! {
        #[test]
        fn test_euclidean_returns_first_minimum((dim, vectors, query) in scan_input()) {
            let collection = collection_of(dim, &vectors);
            let negated: Vec<f32> = vectors
                .iter()
                .map(|v| -math::euclidean_distance(v, &query, dim).unwrap())
                .collect();
            let expected = first_max(&negated);

            let result = collection.find_by_euclidean_distance(&query, |p| p.embedding()).unwrap();

            prop_assert_eq!(result.item.id, expected as i32);
            prop_assert_eq!(result.value, negated[expected]);
            let min = negated.iter().map(|d| -d).fold(f32::INFINITY, f32::min);
            prop_assert_eq!(-result.value, min);
        }
    }

    // Property: a saved payload loads back to the same records in the same order
    proptest! {
        #[test]
        fn test_payload_round_trip(records in prop::collection::vec(pair_strategy(), 0..12)) {
            let mut collection = VectorCollection::new(4);
            collection.add_range(records.clone());

            let bytes = collection.save_to_bytes().unwrap();
            let loaded = VectorCollection::<FunctionCodePair>::load_from_bytes(&bytes, 4).unwrap();

            prop_assert_eq!(loaded.dimension(), 4);
            prop_assert_eq!(loaded.records(), records.as_slice());
            prop_assert_eq!(
                loaded.missing_vector_count(),
                records.iter().filter(|r| r.function_vector.is_none()).count()
            );
        }
    }
}
