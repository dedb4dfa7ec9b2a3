//! `melodyrank`: melodic similarity kernels for plagiarism comparison.
//!
//! Two families of comparison over melodies that have already been reduced to tokens
//! (melodic intervals, or per-measure pitch-class words):
//! - string baselines over raw token sequences: [`align_lcs`], [`align_levenshtein`];
//! - corpus-relative relevance scores over frequency vectors: [`Ranker::score_bm25`],
//!   [`Ranker::score_pln`].
//!
//! Score-file parsing, case datasets and experiment drivers live outside this crate.
//! Everything here is in-memory and deterministic.
//!
//! ```
//! use melodyrank::{melodic_intervals, vectorize_fixed_range, Ranker, RankerParams};
//!
//! let works = [vec![30, 32, 34, 32, 30], vec![30, 31, 32, 34], vec![28, 32, 30, 30]];
//! let corpus: Vec<Vec<u32>> = works
//!     .iter()
//!     .map(|w| vectorize_fixed_range(&melodic_intervals(w), -4, 4))
//!     .collect::<Result<_, _>>()?;
//!
//! let ranker = Ranker::new(&corpus, RankerParams::default())?;
//! let score = ranker.score_bm25(&corpus[1], &corpus[0])?;
//! assert!(score > 0.0);
//! # Ok::<(), melodyrank::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod align;
pub mod corpus;
pub mod melody;
pub mod ranker;
pub mod vectorize;

pub use align::{lcs_len as align_lcs, levenshtein as align_levenshtein};
pub use corpus::{average_sequence_len, CorpusStats};
pub use error::Error;
pub use melody::{interval_bounds, measure_token, measure_tokens, melodic_intervals};
pub use ranker::{Ranker, RankerParams, Scorer};
pub use vectorize::{vectorize_fixed_range, vectorize_vocabulary, FrequencyVector, Vocabulary};

mod error {
    /// Errors for alignment, vectorization and scoring.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        /// The two compared vectors have different lengths.
        #[error("vector length mismatch: {left} vs {right}")]
        LengthMismatch {
            /// Length of the candidate vector.
            left: usize,
            /// Length of the reference vector.
            right: usize,
        },
        /// A vector does not match the corpus feature dimension.
        #[error("vector has {found} features, corpus has {expected}")]
        DimensionMismatch {
            /// Corpus dimension.
            expected: usize,
            /// Offending vector length.
            found: usize,
        },
        /// A feature both vectors contain appears in no corpus member.
        #[error("zero document frequency at feature index {index}")]
        ZeroDocumentFrequency {
            /// Feature index.
            index: usize,
        },
        /// Corpus contains no documents.
        #[error("empty corpus")]
        EmptyCorpus,
        /// Reference corpus was supplied but contains no sequences.
        #[error("empty reference corpus")]
        ReferenceCorpusEmpty,
        /// Average document length is zero (or not finite).
        #[error("average document length is zero")]
        ZeroAverageLength,
        /// Corpus members differ in length.
        #[error("corpus member {position} has {found} features, expected {expected}")]
        RaggedCorpus {
            /// Index of the first offending member.
            position: usize,
            /// Length of the first member.
            expected: usize,
            /// Length of the offending member.
            found: usize,
        },
        /// Fixed vectorization range with `start > end`.
        #[error("invalid range [{start}, {end}]")]
        InvalidRange {
            /// Range start.
            start: i32,
            /// Range end.
            end: i32,
        },
        /// Ranker parameters out of domain.
        #[error("invalid ranker parameters: {0}")]
        InvalidParams(&'static str),
    }
}

/// IDF with the corpus size smoothed by one, base 10.
///
/// \( \mathrm{idf} = \log_{10}( (N + 1) / df ) \)
///
/// Always positive when `df <= N`. `df == 0` returns 0.0 here; [`Ranker`] rejects
/// that case before calling.
pub fn idf_log10_plus1(n_docs: usize, df: u32) -> f64 {
    if df == 0 {
        return 0.0;
    }
    ((n_docs as f64 + 1.0) / f64::from(df)).log10()
}

/// Log-log TF saturation: `ln(1 + ln(1 + tf))`.
///
/// `tf <= 0` returns 0.0.
pub fn log_log_tf(tf: f64) -> f64 {
    if tf <= 0.0 {
        return 0.0;
    }
    (1.0 + (1.0 + tf).ln()).ln()
}

/// Pivoted length normalization factor: `1 - b + b * (doc_len / avg_doc_len)`.
///
/// Callers guarantee `avg_doc_len > 0`.
pub fn length_norm(doc_len: f64, avg_doc_len: f64, b: f64) -> f64 {
    1.0 - b + b * (doc_len / avg_doc_len)
}

/// `k`-saturated TF over a precomputed [`length_norm`]: `(k + 1) tf / (tf + k * norm)`.
///
/// `tf <= 0` returns 0.0.
pub fn pivoted_tf(tf: f64, norm: f64, k: f64) -> f64 {
    if tf <= 0.0 {
        return 0.0;
    }
    ((k + 1.0) * tf) / (tf + k * norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_tf_is_zero() {
        assert_eq!(log_log_tf(0.0), 0.0);
        assert_eq!(pivoted_tf(0.0, 1.0, 1.2), 0.0);
    }

    #[test]
    fn idf_is_positive_and_decreases_with_df() {
        assert_eq!(idf_log10_plus1(10, 0), 0.0);
        assert!(idf_log10_plus1(10, 10) > 0.0);
        assert!(idf_log10_plus1(1000, 1) > idf_log10_plus1(1000, 500));
        assert_relative_eq!(idf_log10_plus1(4, 2), 2.5f64.log10());
    }

    #[test]
    fn log_log_tf_grows_slowly() {
        let one = log_log_tf(1.0);
        let ten = log_log_tf(10.0);
        let hundred = log_log_tf(100.0);
        assert!(one < ten && ten < hundred);
        assert!(hundred - ten < ten - one);
        assert_relative_eq!(one, (1.0 + 2.0f64.ln()).ln());
    }

    #[test]
    fn length_norm_is_one_at_average_length() {
        assert_relative_eq!(length_norm(7.0, 7.0, 0.75), 1.0);
        assert_relative_eq!(length_norm(14.0, 7.0, 0.0), 1.0);
        assert_relative_eq!(length_norm(4.0, 2.0, 0.75), 1.75);
    }

    #[test]
    fn pivoted_tf_saturates_below_k_plus_one() {
        let k = 1.2;
        let big = pivoted_tf(1e9, 1.0, k);
        assert!(big < k + 1.0);
        assert_relative_eq!(big, k + 1.0, epsilon = 1e-6);
        assert_relative_eq!(pivoted_tf(1.0, 1.0, k), 1.0);
    }

    #[test]
    fn error_messages_name_the_problem() {
        let e = Error::ZeroDocumentFrequency { index: 7 };
        assert_eq!(e.to_string(), "zero document frequency at feature index 7");
        let e = Error::LengthMismatch { left: 3, right: 4 };
        assert_eq!(e.to_string(), "vector length mismatch: 3 vs 4");
    }
}
