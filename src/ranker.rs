//! Corpus-relative relevance scoring between two frequency vectors.
//!
//! A [`Ranker`] snapshots a corpus at construction (deep copy plus [`CorpusStats`]) and then
//! scores pairs `(d, c)`:
//! - `d` is the candidate work; its counts multiply each contribution.
//! - `c` is the reference work; its counts feed the TF transform and its length feeds
//!   the length normalization.
//!
//! Only features present in **both** vectors contribute. Neither score is symmetric in
//! `(d, c)`.
//!
//! Two scoring functions:
//! - [`Ranker::score_bm25`]: `d[i] * ln(1 + ln(1 + c[i])) / norm * idf`. This variant
//!   saturates TF with a log-log curve and does not read `k`.
//! - [`Ranker::score_pln`]: `d[i] * (k + 1) c[i] / (c[i] + k * norm) * idf`.
//!
//! where `norm = 1 - b + b * len(c) / avdl` and `idf = log10((N + 1) / df[i])`.
//! `len(c)` is the vector length (number of features), not its sum.

use crate::corpus::CorpusStats;
use crate::vectorize::FrequencyVector;
use crate::{idf_log10_plus1, length_norm, log_log_tf, pivoted_tf, Error};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// Ranker tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerParams {
    /// Term-frequency saturation (`k > 0`). Only the PLN scorer reads it.
    pub k: f64,
    /// Length-normalization weight (`0 <= b <= 1`).
    pub b: f64,
}

impl Default for RankerParams {
    fn default() -> Self {
        Self { k: 1.2, b: 0.75 }
    }
}

impl RankerParams {
    /// Check parameter domains.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(Error::InvalidParams("k must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(Error::InvalidParams("b must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Scoring function selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Log-log TF, no `k` saturation.
    #[default]
    Bm25,
    /// Pivoted length normalization with `k` saturation.
    #[cfg_attr(feature = "cli", value(name = "pln"))]
    #[serde(rename = "pln")]
    PivotedLengthNormalization,
}

/// Scores frequency-vector pairs against a frozen corpus snapshot.
///
/// Immutable after construction, so one instance can be shared read-only across threads.
#[derive(Debug, Clone)]
pub struct Ranker {
    params: RankerParams,
    corpus: Vec<FrequencyVector>,
    stats: CorpusStats,
}

impl Ranker {
    /// Build a ranker; `avdl` is the mean vector sum over `corpus`.
    pub fn new<V: AsRef<[u32]>>(corpus: &[V], params: RankerParams) -> Result<Self, Error> {
        params.validate()?;
        let stats = CorpusStats::from_corpus(corpus)?;
        Ok(Self::from_parts(corpus, stats, params))
    }

    /// Build a ranker whose `avdl` comes from the raw reference-sequence lengths instead.
    pub fn with_reference_lengths<V, L>(
        corpus: &[V],
        reference_lengths: L,
        params: RankerParams,
    ) -> Result<Self, Error>
    where
        V: AsRef<[u32]>,
        L: IntoIterator<Item = usize>,
    {
        params.validate()?;
        let stats = CorpusStats::with_reference_lengths(corpus, reference_lengths)?;
        Ok(Self::from_parts(corpus, stats, params))
    }

    fn from_parts<V: AsRef<[u32]>>(
        corpus: &[V],
        stats: CorpusStats,
        params: RankerParams,
    ) -> Self {
        debug!(
            "ranker: n_docs={} dim={} avdl={:.4} k={} b={}",
            stats.num_docs(),
            stats.dimension(),
            stats.avdl(),
            params.k,
            params.b
        );
        Self {
            params,
            corpus: corpus.iter().map(|v| v.as_ref().to_vec()).collect(),
            stats,
        }
    }

    /// Tuning parameters.
    pub fn params(&self) -> RankerParams {
        self.params
    }

    /// Statistics of the corpus snapshot.
    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    /// The corpus snapshot.
    pub fn corpus(&self) -> &[FrequencyVector] {
        &self.corpus
    }

    /// BM25-style score of candidate `d` against reference `c`. Higher is more similar.
    ///
    /// Errors:
    /// - [`Error::LengthMismatch`] / [`Error::DimensionMismatch`] before any computation.
    /// - [`Error::ZeroDocumentFrequency`] if a feature present in both has `df == 0`.
    pub fn score_bm25(&self, d: &[u32], c: &[u32]) -> Result<f64, Error> {
        let norm = self.pair_norm(d, c)?;
        self.accumulate(d, c, |tf| log_log_tf(tf) / norm)
    }

    /// Pivoted-length-normalization score of candidate `d` against reference `c`.
    ///
    /// Same preconditions and errors as [`Ranker::score_bm25`].
    pub fn score_pln(&self, d: &[u32], c: &[u32]) -> Result<f64, Error> {
        let norm = self.pair_norm(d, c)?;
        let k = self.params.k;
        self.accumulate(d, c, |tf| pivoted_tf(tf, norm, k))
    }

    /// Dispatch on `scorer`.
    pub fn score(&self, scorer: Scorer, d: &[u32], c: &[u32]) -> Result<f64, Error> {
        match scorer {
            Scorer::Bm25 => self.score_bm25(d, c),
            Scorer::PivotedLengthNormalization => self.score_pln(d, c),
        }
    }

    /// Score `query` (as candidate) against every corpus member (as reference).
    ///
    /// Members whose score errors or is non-finite are skipped.
    /// Output is sorted deterministically: score desc, then corpus position asc.
    pub fn rank(
        &self,
        scorer: Scorer,
        query: &[u32],
        top_k: usize,
    ) -> Result<Vec<(usize, f64)>, Error> {
        if query.len() != self.stats.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.stats.dimension(),
                found: query.len(),
            });
        }
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let mut scored: Vec<(usize, f64)> = self
            .corpus
            .iter()
            .enumerate()
            .filter_map(|(pos, member)| match self.score(scorer, query, member) {
                Ok(s) if s.is_finite() => Some((pos, s)),
                _ => None,
            })
            .collect();
        scored.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(top_k);
        Ok(scored)
    }

    /// Score many `(d, c)` pairs; one result per pair, in input order.
    ///
    /// A failing pair does not affect the others. With the `parallel` feature the pairs
    /// are spread over the rayon pool.
    pub fn score_batch<V>(&self, scorer: Scorer, pairs: &[(V, V)]) -> Vec<Result<f64, Error>>
    where
        V: AsRef<[u32]> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            pairs
                .par_iter()
                .map(|(d, c)| self.score(scorer, d.as_ref(), c.as_ref()))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            pairs
                .iter()
                .map(|(d, c)| self.score(scorer, d.as_ref(), c.as_ref()))
                .collect()
        }
    }

    // Validates shapes and returns the length normalization for reference `c`.
    fn pair_norm(&self, d: &[u32], c: &[u32]) -> Result<f64, Error> {
        if d.len() != c.len() {
            return Err(Error::LengthMismatch {
                left: d.len(),
                right: c.len(),
            });
        }
        if c.len() != self.stats.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.stats.dimension(),
                found: c.len(),
            });
        }
        Ok(length_norm(c.len() as f64, self.stats.avdl(), self.params.b))
    }

    fn accumulate<F>(&self, d: &[u32], c: &[u32], tf_weight: F) -> Result<f64, Error>
    where
        F: Fn(f64) -> f64,
    {
        let n_docs = self.stats.num_docs();
        let mut score = 0.0;
        for (index, (&dv, &cv)) in d.iter().zip(c).enumerate() {
            if dv == 0 || cv == 0 {
                continue;
            }
            let df = self.stats.doc_frequency(index);
            if df == 0 {
                warn!("feature {index} present in both works but in no corpus member");
                return Err(Error::ZeroDocumentFrequency { index });
            }
            score += f64::from(dv) * tf_weight(f64::from(cv)) * idf_log10_plus1(n_docs, df);
        }
        trace!("scored pair: dim={} score={score}", d.len());
        Ok(score)
    }
}
