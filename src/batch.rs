/// Request batching - splits a site list into provider-sized chunks.
///
/// The state APIs cap the number of sites per request, so each state's
/// bucket is split into contiguous batches before dispatch.

/// Splits `items` into contiguous groups of at most `max_len`, preserving
/// order; the last group may be shorter. A `max_len` at or above the input
/// length yields a single group containing all items.
///
/// # Panics
/// Panics if `max_len` is zero.
pub fn chunk<T: Clone>(items: &[T], max_len: usize) -> Vec<Vec<T>> {
    assert!(max_len > 0, "max_len must be positive");
    items.chunks(max_len).map(<[T]>::to_vec).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_worked_examples() {
        let l: Vec<i32> = (0..13).collect();

        assert_eq!(chunk(&l, 1).len(), 13);
        assert!(chunk(&l, 1).iter().all(|c| c.len() == 1));

        assert_eq!(
            chunk(&l, 2),
            vec![
                vec![0, 1],
                vec![2, 3],
                vec![4, 5],
                vec![6, 7],
                vec![8, 9],
                vec![10, 11],
                vec![12]
            ]
        );

        assert_eq!(
            chunk(&l, 3),
            vec![
                vec![0, 1, 2],
                vec![3, 4, 5],
                vec![6, 7, 8],
                vec![9, 10, 11],
                vec![12]
            ]
        );

        assert_eq!(
            chunk(&l, 4),
            vec![
                vec![0, 1, 2, 3],
                vec![4, 5, 6, 7],
                vec![8, 9, 10, 11],
                vec![12]
            ]
        );
    }

    #[test]
    fn test_chunk_max_len_at_or_above_input_yields_single_group() {
        let l: Vec<i32> = (0..13).collect();
        assert_eq!(chunk(&l, 13), vec![l.clone()]);
        assert_eq!(chunk(&l, 14), vec![l.clone()]);
        assert_eq!(chunk(&l, 1000), vec![l.clone()]);
    }

    #[test]
    fn test_chunk_concatenation_reproduces_input() {
        let l: Vec<i32> = (0..29).collect();
        for max_len in 1..=30 {
            let chunks = chunk(&l, max_len);
            let rebuilt: Vec<i32> = chunks.iter().flatten().copied().collect();
            assert_eq!(rebuilt, l, "max_len={max_len}");
            // Every batch except possibly the last is exactly max_len.
            for c in &chunks[..chunks.len().saturating_sub(1)] {
                assert_eq!(c.len(), max_len, "max_len={max_len}");
            }
        }
    }

    #[test]
    fn test_chunk_empty_input() {
        let empty: Vec<i32> = vec![];
        assert!(chunk(&empty, 5).is_empty());
    }

    #[test]
    #[should_panic(expected = "max_len must be positive")]
    fn test_chunk_zero_max_len_panics() {
        chunk(&[1, 2, 3], 0);
    }
}
