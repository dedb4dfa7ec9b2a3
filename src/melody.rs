//! Token helpers for melodies already reduced to diatonic pitch numbers.
//!
//! Score-file parsing is out of scope; callers hand in pitch numbers (e.g. a
//! diatonic note number per note of the melody part) and get back the token
//! sequences the aligner and vectorizers consume.

use std::collections::BTreeSet;

/// Default fixed interval range `[DEFAULT_RANGE_START, DEFAULT_RANGE_END]` for vectorizing.
///
/// Covers the extremes observed across the litigation corpus (-18, 14) with headroom.
pub const DEFAULT_RANGE_START: i32 = -20;
/// See [`DEFAULT_RANGE_START`].
pub const DEFAULT_RANGE_END: i32 = 20;

/// Signed steps between consecutive pitches: `p[i+1] - p[i]`.
///
/// ```
/// assert_eq!(melodyrank::melodic_intervals(&[30, 32, 32, 29]), vec![2, 0, -3]);
/// ```
pub fn melodic_intervals(pitches: &[i32]) -> Vec<i32> {
    pitches.windows(2).map(|w| w[1] - w[0]).collect()
}

/// The "vertical" word for one measure.
///
/// Pitch classes (`p mod 12`, non-negative), de-duplicated and ascending, joined by `.`
/// so that `1.2` and `12` stay distinct.
pub fn measure_token(pitches: &[i32]) -> String {
    let classes: BTreeSet<i32> = pitches.iter().map(|p| p.rem_euclid(12)).collect();
    classes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// One [`measure_token`] per measure.
pub fn measure_tokens<M: AsRef<[i32]>>(measures: &[M]) -> Vec<String> {
    measures.iter().map(|m| measure_token(m.as_ref())).collect()
}

/// Smallest and largest interval across all sequences; `None` if every sequence is empty.
///
/// Used to size a fixed vectorization range that loses nothing.
pub fn interval_bounds<S: AsRef<[i32]>>(sequences: &[S]) -> Option<(i32, i32)> {
    sequences
        .iter()
        .flat_map(|s| s.as_ref().iter().copied())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_of_short_melodies() {
        assert!(melodic_intervals(&[]).is_empty());
        assert!(melodic_intervals(&[35]).is_empty());
        assert_eq!(melodic_intervals(&[35, 33]), vec![-2]);
    }

    #[test]
    fn measure_token_reduces_octaves_and_sorts() {
        assert_eq!(measure_token(&[14, 2, 7]), "2.7");
        assert_eq!(measure_token(&[12, 1, 2]), "0.1.2");
        assert_eq!(measure_token(&[]), "");
        assert_eq!(measure_token(&[-1]), "11");
    }

    #[test]
    fn measure_tokens_per_measure() {
        let measures = vec![vec![28, 30, 32], vec![29], vec![]];
        assert_eq!(measure_tokens(&measures), vec!["4.6.8", "5", ""]);
    }

    #[test]
    fn interval_bounds_over_corpus() {
        let seqs = vec![vec![0, 2, -3], vec![], vec![7, -1]];
        assert_eq!(interval_bounds(&seqs), Some((-3, 7)));
        let empty: Vec<Vec<i32>> = vec![vec![], vec![]];
        assert_eq!(interval_bounds(&empty), None);
    }

    #[test]
    fn default_range_is_symmetric() {
        assert_eq!(DEFAULT_RANGE_START, -DEFAULT_RANGE_END);
    }
}
