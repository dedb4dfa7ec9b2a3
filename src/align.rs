//! Sequence alignment baselines: longest common subsequence and Levenshtein distance.
//!
//! Both kernels work over any `PartialEq` token (melodic intervals, measure tokens, ...)
//! and return raw counts. Nothing is normalized by length.
//!
//! Polarity differs between the two:
//! - [`lcs_len`]: higher means more shared structure.
//! - [`levenshtein`]: lower means more similar.
//!
//! Callers comparing the two must flip one of them; they are not interchangeable.

/// Length of the longest common subsequence of `a` and `b`.
///
/// Classic `O(m·n)` dynamic program, keeping only two rows of the table.
/// Tokens are compared by equality only.
///
/// Empty input on either side returns 0.
pub fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Unit-cost Levenshtein edit distance (insert, delete, substitute) between `a` and `b`.
///
/// Empty input on one side returns the length of the other.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    // prev[j] = D[i-1][j]; row 0 is D[0][j] = j.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, x) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcs_of_sequence_with_itself_is_its_length() {
        let a = [0, 2, -1, -1, 3, 0, -2];
        assert_eq!(lcs_len(&a, &a), a.len());
    }

    #[test]
    fn levenshtein_of_sequence_with_itself_is_zero() {
        let a = [0, 2, -1, -1, 3, 0, -2];
        assert_eq!(levenshtein(&a, &a), 0);
    }

    #[test]
    fn empty_inputs() {
        let b = [1, 2, 3];
        let empty: [i32; 0] = [];
        assert_eq!(lcs_len(&empty, &b), 0);
        assert_eq!(lcs_len(&b, &empty), 0);
        assert_eq!(levenshtein(&empty, &b), 3);
        assert_eq!(levenshtein(&b, &empty), 3);
        assert_eq!(levenshtein(&empty, &empty), 0);
    }

    #[test]
    fn both_metrics_are_symmetric() {
        let a = [1, -2, 0, 0, 3, 1, -1];
        let b = [0, -2, 1, 3, 3, -1];
        assert_eq!(lcs_len(&a, &b), lcs_len(&b, &a));
        assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn textbook_values() {
        let kitten: Vec<char> = "kitten".chars().collect();
        let sitting: Vec<char> = "sitting".chars().collect();
        assert_eq!(levenshtein(&kitten, &sitting), 3);

        let a: Vec<char> = "ABCBDAB".chars().collect();
        let b: Vec<char> = "BDCABA".chars().collect();
        assert_eq!(lcs_len(&a, &b), 4);
    }

    #[test]
    fn works_over_measure_tokens() {
        let a = ["0.4.7", "2.5.9", "0.4.7"];
        let b = ["0.4.7", "0.4.7"];
        assert_eq!(lcs_len(&a, &b), 2);
        assert_eq!(levenshtein(&a, &b), 1);
    }

    #[test]
    fn bounds_relate_to_lengths() {
        let a = [3, 1, 4, 1, 5, 9, 2, 6];
        let b = [2, 7, 1, 8, 2, 8];
        let lcs = lcs_len(&a, &b);
        let lev = levenshtein(&a, &b);
        assert!(lcs <= a.len().min(b.len()));
        assert!(lev >= a.len().abs_diff(b.len()));
        assert!(lev <= a.len().max(b.len()));
    }
}
