//! Token sequences to fixed-order frequency vectors.
//!
//! Two ways to pin down "which index means which feature":
//! - a fixed inclusive integer range `[start, end]` (melodic intervals), or
//! - a shared [`Vocabulary`] (measure tokens, built by unioning a corpus).
//!
//! Every vector placed in the same corpus, or compared against another, must come
//! from the same range or the same vocabulary instance.

use crate::Error;
use std::collections::HashMap;
use std::hash::Hash;

/// Frequency vector: position `i` counts occurrences of feature `i`.
pub type FrequencyVector = Vec<u32>;

/// Count integer tokens into a vector indexed by `value - start`, for values in `[start, end]`.
///
/// Values outside the range are dropped (clipped, not counted, no error).
///
/// ```
/// let v = melodyrank::vectorize_fixed_range(&[0, 0, 2, -3], -3, 2).unwrap();
/// assert_eq!(v, vec![1, 0, 0, 2, 0, 1]);
/// ```
pub fn vectorize_fixed_range(
    seq: &[i32],
    start: i32,
    end: i32,
) -> Result<FrequencyVector, Error> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }
    let width = (i64::from(end) - i64::from(start) + 1) as usize;
    let mut out = vec![0u32; width];
    for &value in seq {
        if value < start || value > end {
            continue;
        }
        let idx = (i64::from(value) - i64::from(start)) as usize;
        out[idx] += 1;
    }
    Ok(out)
}

/// Count tokens against a vocabulary; tokens missing from it are dropped.
pub fn vectorize_vocabulary<T: Eq + Hash>(seq: &[T], vocab: &Vocabulary<T>) -> FrequencyVector {
    let mut out = vec![0u32; vocab.len()];
    for token in seq {
        if let Some(idx) = vocab.index_of(token) {
            out[idx] += 1;
        }
    }
    out
}

/// An ordered set of distinct tokens; a token's position is its feature index.
///
/// Order is fixed once built. Share one instance across every vector of a session.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary<T> {
    tokens: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> Vocabulary<T> {
    /// Build from an explicit token list. Duplicates keep their first position.
    pub fn new<I: IntoIterator<Item = T>>(tokens: I) -> Self {
        let mut vocab = Self {
            tokens: Vec::new(),
            index: HashMap::new(),
        };
        for t in tokens {
            vocab.insert(t);
        }
        vocab
    }

    /// Union of the token sets of every document, in first-seen order.
    pub fn from_documents<'a, D>(docs: D) -> Self
    where
        D: IntoIterator<Item = &'a [T]>,
        T: 'a,
    {
        let mut vocab = Self::new(std::iter::empty());
        for doc in docs {
            for t in doc {
                if !vocab.index.contains_key(t) {
                    vocab.insert(t.clone());
                }
            }
        }
        vocab
    }

    fn insert(&mut self, token: T) {
        if self.index.contains_key(&token) {
            return;
        }
        self.index.insert(token.clone(), self.tokens.len());
        self.tokens.push(token);
    }
}

impl<T: Eq + Hash> Vocabulary<T> {
    /// Number of features (vector length).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the vocabulary has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Feature index of `token`, if present.
    pub fn index_of(&self, token: &T) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Tokens in feature order.
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Shorthand for [`vectorize_vocabulary`].
    pub fn vectorize(&self, seq: &[T]) -> FrequencyVector {
        vectorize_vocabulary(seq, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_range_counts_by_offset() {
        let v = vectorize_fixed_range(&[0, 0, 2, -3], -3, 2).unwrap();
        assert_eq!(v, vec![1, 0, 0, 2, 0, 1]);
    }

    #[test]
    fn fixed_range_drops_out_of_range_values() {
        let v = vectorize_fixed_range(&[5, 0], -1, 1).unwrap();
        assert_eq!(v, vec![0, 1, 0]);
        let v = vectorize_fixed_range(&[-9, 9], -1, 1).unwrap();
        assert_eq!(v, vec![0, 0, 0]);
    }

    #[test]
    fn fixed_range_single_point_and_empty_input() {
        assert_eq!(vectorize_fixed_range(&[4, 4, 3], 4, 4).unwrap(), vec![2]);
        assert_eq!(vectorize_fixed_range(&[], -2, 2).unwrap(), vec![0; 5]);
    }

    #[test]
    fn fixed_range_rejects_inverted_bounds() {
        let err = vectorize_fixed_range(&[0], 3, -3).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: 3, end: -3 }));
    }

    #[test]
    fn fixed_range_handles_extreme_bounds() {
        let v =
            vectorize_fixed_range(&[i32::MAX, i32::MAX - 1], i32::MAX - 1, i32::MAX).unwrap();
        assert_eq!(v, vec![1, 1]);
    }

    #[test]
    fn vocabulary_is_first_seen_union() {
        let a = vec!["0.4.7".to_string(), "2.5".to_string()];
        let b = vec!["2.5".to_string(), "7".to_string(), "0.4.7".to_string()];
        let vocab = Vocabulary::from_documents([a.as_slice(), b.as_slice()]);
        assert_eq!(vocab.tokens(), &["0.4.7", "2.5", "7"]);
        assert_eq!(vocab.index_of(&"7".to_string()), Some(2));
        assert_eq!(vocab.index_of(&"11".to_string()), None);
    }

    #[test]
    fn vocabulary_vectors_share_index_meaning() {
        let vocab = Vocabulary::new(["a", "b", "c"]);
        assert_eq!(vocab.vectorize(&["c", "a", "c", "z"]), vec![1, 0, 2]);
        assert_eq!(vectorize_vocabulary(&["b"], &vocab), vec![0, 1, 0]);
    }

    #[test]
    fn vocabulary_new_dedups() {
        let vocab = Vocabulary::new([3, 1, 3, 2]);
        assert_eq!(vocab.tokens(), &[3, 1, 2]);
        assert_eq!(vocab.len(), 3);
        assert!(!vocab.is_empty());
        assert!(Vocabulary::<i32>::default().is_empty());
    }
}
