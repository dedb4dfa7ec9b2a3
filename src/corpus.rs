//! Corpus-wide statistics: per-feature document frequency and average document length.
//!
//! Computed once, from a snapshot. Later changes to the caller's corpus are not seen.

use crate::Error;

/// Document frequency, corpus size and average document length for one corpus snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStats {
    df: Vec<u32>,
    n_docs: usize,
    avdl: f64,
}

impl CorpusStats {
    /// Compute statistics from a corpus of equal-length frequency vectors.
    ///
    /// `avdl` is the mean over documents of the sum of their entries.
    ///
    /// Errors:
    /// - [`Error::EmptyCorpus`] for no documents.
    /// - [`Error::RaggedCorpus`] when vector lengths differ.
    /// - [`Error::ZeroAverageLength`] when every vector is all zeros.
    pub fn from_corpus<V: AsRef<[u32]>>(corpus: &[V]) -> Result<Self, Error> {
        let dim = check_shape(corpus)?;
        let total: u64 = corpus
            .iter()
            .map(|doc| doc.as_ref().iter().map(|&x| u64::from(x)).sum::<u64>())
            .sum();
        let avdl = total as f64 / corpus.len() as f64;
        Self::build(corpus, dim, avdl)
    }

    /// Like [`CorpusStats::from_corpus`], but `avdl` is the mean of the lengths of raw
    /// reference sequences (one length per reference sequence).
    ///
    /// Use this when the length normalization should follow melody length rather than
    /// the vector footprint (e.g. intervals clipped out of the fixed range).
    pub fn with_reference_lengths<V, L>(corpus: &[V], lengths: L) -> Result<Self, Error>
    where
        V: AsRef<[u32]>,
        L: IntoIterator<Item = usize>,
    {
        let dim = check_shape(corpus)?;
        let avdl = average_sequence_len(lengths).ok_or(Error::ReferenceCorpusEmpty)?;
        Self::build(corpus, dim, avdl)
    }

    fn build<V: AsRef<[u32]>>(corpus: &[V], dim: usize, avdl: f64) -> Result<Self, Error> {
        if !(avdl.is_finite() && avdl > 0.0) {
            return Err(Error::ZeroAverageLength);
        }
        let mut df = vec![0u32; dim];
        for doc in corpus {
            for (count, &x) in df.iter_mut().zip(doc.as_ref()) {
                if x != 0 {
                    *count += 1;
                }
            }
        }
        Ok(Self {
            df,
            n_docs: corpus.len(),
            avdl,
        })
    }

    /// Number of corpus members containing feature `index` (0 when out of range).
    pub fn doc_frequency(&self, index: usize) -> u32 {
        self.df.get(index).copied().unwrap_or(0)
    }

    /// Per-feature document frequencies.
    pub fn doc_frequencies(&self) -> &[u32] {
        &self.df
    }

    /// Number of corpus members.
    pub fn num_docs(&self) -> usize {
        self.n_docs
    }

    /// Feature-vector length shared by all members.
    pub fn dimension(&self) -> usize {
        self.df.len()
    }

    /// Average document length.
    pub fn avdl(&self) -> f64 {
        self.avdl
    }
}

/// Mean of a collection of sequence lengths (`None` if there are none).
///
/// ```
/// let melodies = [vec![0, 2, -1], vec![1]];
/// let avdl = melodyrank::average_sequence_len(melodies.iter().map(Vec::len));
/// assert_eq!(avdl, Some(2.0));
/// ```
pub fn average_sequence_len<L: IntoIterator<Item = usize>>(lengths: L) -> Option<f64> {
    let (count, total) = lengths
        .into_iter()
        .fold((0usize, 0usize), |(n, sum), len| (n + 1, sum + len));
    if count == 0 {
        return None;
    }
    Some(total as f64 / count as f64)
}

fn check_shape<V: AsRef<[u32]>>(corpus: &[V]) -> Result<usize, Error> {
    let first = corpus.first().ok_or(Error::EmptyCorpus)?;
    let dim = first.as_ref().len();
    for (position, doc) in corpus.iter().enumerate().skip(1) {
        let found = doc.as_ref().len();
        if found != dim {
            return Err(Error::RaggedCorpus {
                position,
                expected: dim,
                found,
            });
        }
    }
    Ok(dim)
}
