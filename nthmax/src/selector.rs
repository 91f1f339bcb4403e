//! Bounded min-heap selection of the N-th largest value.
//!
//! [`TopN`] keeps the `n` largest values seen so far in a min-heap of at most
//! `n` elements, so a column of any length is scanned in `O(n)` memory. Its
//! minimum is the current candidate for the N-th maximum.
//!
//! ```
//! use nthmax::select_nth_max;
//!
//! let values = vec![Some(10), Some(5), Some(20), None, Some(15), Some(3)];
//! assert_eq!(select_nth_max(values, 2).unwrap(), 15);
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{NthMaxError, Result};

/// Upper bound on the heap's up-front allocation; larger `n` grow on demand.
const PREALLOC_LIMIT: usize = 1024;

/// The `n` largest values of a stream, held in a min-heap of at most `n` elements.
#[derive(Debug, Clone)]
pub struct TopN<T: Ord> {
    heap: BinaryHeap<Reverse<T>>,
    n: usize,
}

impl<T: Ord> TopN<T> {
    /// Create an empty selector for the `n` largest values.
    ///
    /// # Errors
    ///
    /// Returns [`NthMaxError::InvalidArgument`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(NthMaxError::InvalidArgument { n: 0 });
        }
        Ok(Self {
            heap: BinaryHeap::with_capacity(n.saturating_add(1).min(PREALLOC_LIMIT)),
            n,
        })
    }

    /// Offer a value, evicting the current minimum if more than `n` are held.
    pub fn push(&mut self, value: T) {
        self.heap.push(Reverse(value));
        if self.heap.len() > self.n {
            self.heap.pop();
        }
    }

    /// Number of values currently held (never more than `n`).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no values have been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The `n` this selector was created for.
    pub fn capacity(&self) -> usize {
        self.n
    }

    /// Whether `n` values have been seen.
    pub fn is_full(&self) -> bool {
        self.heap.len() == self.n
    }

    /// The N-th largest value seen so far, or `None` until `n` values have been pushed.
    pub fn nth(&self) -> Option<&T> {
        if self.is_full() {
            self.heap.peek().map(|Reverse(v)| v)
        } else {
            None
        }
    }

    /// Build a selector for `n` and feed it every present value of `values`.
    ///
    /// The first `Err` stops the pass and is returned as-is.
    pub fn try_fill<E, I>(n: usize, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<Option<T>, E>>,
        NthMaxError: From<E>,
    {
        let mut top = Self::new(n)?;
        for value in values {
            if let Some(v) = value? {
                top.push(v);
            }
        }
        Ok(top)
    }

    /// Consume the selector and return the N-th largest value.
    ///
    /// # Errors
    ///
    /// Returns [`NthMaxError::InsufficientData`] if fewer than `n` values were pushed.
    pub fn finish(mut self) -> Result<T> {
        if self.is_full() {
            if let Some(Reverse(v)) = self.heap.pop() {
                return Ok(v);
            }
        }
        Err(self.insufficient())
    }

    /// Consume the selector and return all `n` values, largest first.
    ///
    /// # Errors
    ///
    /// Returns [`NthMaxError::InsufficientData`] if fewer than `n` values were pushed.
    pub fn finish_sorted_desc(self) -> Result<Vec<T>> {
        if !self.is_full() {
            return Err(self.insufficient());
        }
        Ok(self.into_sorted_desc())
    }

    /// Consume the selector and return the retained values, largest first.
    pub fn into_sorted_desc(self) -> Vec<T> {
        // Ascending order of `Reverse<T>` is descending order of `T`.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(v)| v)
            .collect()
    }

    fn insufficient(&self) -> NthMaxError {
        NthMaxError::InsufficientData {
            requested: self.n,
            found: self.heap.len(),
        }
    }
}

/// Return the `n`-th largest present value of `values` (1st = largest).
///
/// Absent elements (`None`) are skipped. Duplicates occupy separate positions.
/// The sequence is consumed once, in order.
///
/// # Errors
///
/// - [`NthMaxError::InvalidArgument`] if `n` is zero; `values` is not iterated.
/// - [`NthMaxError::InsufficientData`] if fewer than `n` values were present.
pub fn select_nth_max<T, I>(values: I, n: usize) -> Result<T>
where
    T: Ord,
    I: IntoIterator<Item = Option<T>>,
{
    try_select_nth_max(values.into_iter().map(Ok::<_, std::convert::Infallible>), n)
}

/// Like [`select_nth_max`], for sources whose reads can fail.
///
/// The first `Err` stops the pass and is returned as-is.
pub fn try_select_nth_max<T, E, I>(values: I, n: usize) -> Result<T>
where
    T: Ord,
    I: IntoIterator<Item = std::result::Result<Option<T>, E>>,
    NthMaxError: From<E>,
{
    TopN::try_fill(n, values)?.finish()
}

/// Return the `n` largest present values of a fallible source, largest first.
///
/// # Errors
///
/// Same as [`try_select_nth_max`].
pub fn try_select_top_n<T, E, I>(values: I, n: usize) -> Result<Vec<T>>
where
    T: Ord,
    I: IntoIterator<Item = std::result::Result<Option<T>, E>>,
    NthMaxError: From<E>,
{
    TopN::try_fill(n, values)?.finish_sorted_desc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn present(values: &[i64]) -> Vec<Option<i64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_second_largest() {
        let result = select_nth_max(present(&[10, 5, 20, 15, 3]), 2).unwrap();
        assert_eq!(result, 15);
    }

    #[test]
    fn test_first_is_maximum() {
        let result = select_nth_max(present(&[10, 5, 20, 15, 3]), 1).unwrap();
        assert_eq!(result, 20);
    }

    #[test]
    fn test_last_is_minimum() {
        let result = select_nth_max(present(&[10, 5, 20, 15, 3]), 5).unwrap();
        assert_eq!(result, 3);
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let values = vec![Some(10), None, Some(5)];
        match select_nth_max(values, 3) {
            Err(NthMaxError::InsufficientData { requested, found }) => {
                assert_eq!(requested, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }

        let values = vec![None, Some(10), None, Some(5), None];
        assert_eq!(select_nth_max(values, 2).unwrap(), 5);
    }

    #[test]
    fn test_empty_input() {
        let values: Vec<Option<i64>> = Vec::new();
        assert!(matches!(
            select_nth_max(values, 1),
            Err(NthMaxError::InsufficientData {
                requested: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn test_zero_n_does_not_consume_input() {
        let mut pulled = 0;
        let values = std::iter::from_fn(|| {
            pulled += 1;
            Some(Some(1i64))
        });
        assert!(matches!(
            select_nth_max(values, 0),
            Err(NthMaxError::InvalidArgument { n: 0 })
        ));
        assert_eq!(pulled, 0);
    }

    #[test]
    fn test_duplicates_count_separately() {
        assert_eq!(select_nth_max(present(&[4, 4]), 2).unwrap(), 4);
        assert_eq!(select_nth_max(present(&[7, 9, 9, 1]), 2).unwrap(), 9);
        assert_eq!(select_nth_max(present(&[7, 9, 9, 1]), 3).unwrap(), 7);
    }

    #[test]
    fn test_negative_values() {
        let values = present(&[-5, -1, -10, -3]);
        assert_eq!(select_nth_max(values.clone(), 1).unwrap(), -1);
        assert_eq!(select_nth_max(values, 3).unwrap(), -5);
    }

    #[test]
    fn test_generic_over_ord() {
        let words = vec![Some("pear"), None, Some("apple"), Some("zucchini")];
        assert_eq!(select_nth_max(words, 2).unwrap(), "pear");
    }

    #[test]
    fn test_try_select_propagates_first_error() {
        let values: Vec<std::result::Result<Option<i64>, NthMaxError>> = vec![
            Ok(Some(3)),
            Err(NthMaxError::NonNumericCell {
                row: 1,
                value: "oops".to_string(),
            }),
            Ok(Some(9)),
        ];
        match try_select_nth_max(values, 1) {
            Err(NthMaxError::NonNumericCell { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected NonNumericCell, got {:?}", other),
        }
    }

    #[test]
    fn test_top_n_state() {
        let mut top = TopN::new(3).unwrap();
        assert!(top.is_empty());
        assert_eq!(top.capacity(), 3);
        assert_eq!(top.nth(), None);

        for v in [8, 1, 6, 3] {
            top.push(v);
        }
        assert_eq!(top.len(), 3);
        assert!(top.is_full());
        assert_eq!(top.nth(), Some(&3));

        top.push(7);
        assert_eq!(top.nth(), Some(&6));
        assert_eq!(top.into_sorted_desc(), vec![8, 7, 6]);
    }

    #[test]
    fn test_top_n_rejects_zero() {
        assert!(matches!(
            TopN::<i64>::new(0),
            Err(NthMaxError::InvalidArgument { n: 0 })
        ));
    }

    #[test]
    fn test_huge_n_is_insufficient_data() {
        for n in [usize::MAX, 1usize << 40] {
            match select_nth_max(present(&[1, 2]), n) {
                Err(NthMaxError::InsufficientData { requested, found }) => {
                    assert_eq!(requested, n);
                    assert_eq!(found, 2);
                }
                other => panic!("expected InsufficientData, got {:?}", other),
            }
        }

        let top = TopN::<i64>::new(usize::MAX).unwrap();
        assert_eq!(top.capacity(), usize::MAX);
        assert!(!top.is_full());
    }

    #[test]
    fn test_select_top_n() {
        let values: Vec<std::result::Result<Option<i64>, NthMaxError>> =
            vec![Ok(Some(3)), Ok(None), Ok(Some(11)), Ok(Some(-2)), Ok(Some(11))];
        assert_eq!(try_select_top_n(values, 3).unwrap(), vec![11, 11, 3]);

        let short: Vec<std::result::Result<Option<i64>, NthMaxError>> = vec![Ok(Some(1))];
        assert!(matches!(
            try_select_top_n(short, 2),
            Err(NthMaxError::InsufficientData {
                requested: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_independent_passes_agree() {
        let values = present(&[12, -4, 33, 0, 33, 7]);
        let first = select_nth_max(values.clone(), 3).unwrap();
        let second = select_nth_max(values, 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 12);
    }

    proptest! {
        #[test]
        fn prop_matches_sorted_selection(
            values in proptest::collection::vec(proptest::option::of(-1000i64..1000), 0..200),
            n in 1usize..20,
        ) {
            let mut sorted: Vec<i64> = values.iter().flatten().copied().collect();
            sorted.sort_unstable_by(|a, b| b.cmp(a));

            match select_nth_max(values.clone(), n) {
                Ok(v) => prop_assert_eq!(v, sorted[n - 1]),
                Err(NthMaxError::InsufficientData { requested, found }) => {
                    prop_assert!(sorted.len() < n);
                    prop_assert_eq!(requested, n);
                    prop_assert_eq!(found, sorted.len());
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }

        #[test]
        fn prop_first_is_maximum(values in proptest::collection::vec(-1000i64..1000, 1..100)) {
            let expected = *values.iter().max().unwrap();
            let got = select_nth_max(values.into_iter().map(Some), 1).unwrap();
            prop_assert_eq!(got, expected);
        }
    }
}
