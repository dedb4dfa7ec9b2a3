//! `melodyrank` CLI: compare melodies by alignment and corpus-relative scoring.
//!
//! Sequences and vectors are passed as JSON arrays; corpora are JSON files holding an
//! array of equal-length count arrays.

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use melodyrank::{
    align_lcs, align_levenshtein, melodic_intervals, vectorize_fixed_range, Ranker, RankerParams,
    Scorer,
};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(author, version, about = "Melodic similarity CLI", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// LCS length and Levenshtein distance between two token sequences.
    Align {
        /// First sequence, e.g. `[0,2,-1]` or `["0.4.7","2.5"]`.
        #[arg(long)]
        a: String,

        /// Second sequence.
        #[arg(long)]
        b: String,
    },

    /// Melodic intervals of a pitch-number sequence.
    Intervals {
        /// Pitch numbers, e.g. `[30,32,29]`.
        #[arg(long)]
        pitches: String,
    },

    /// Frequency vector of an integer sequence over `[start, end]`.
    Vectorize {
        /// Integer sequence.
        #[arg(long)]
        seq: String,

        /// Range start (inclusive).
        #[arg(long, default_value_t = melodyrank::melody::DEFAULT_RANGE_START, allow_negative_numbers = true)]
        start: i32,

        /// Range end (inclusive).
        #[arg(long, default_value_t = melodyrank::melody::DEFAULT_RANGE_END, allow_negative_numbers = true)]
        end: i32,
    },

    /// BM25 and PLN scores of candidate `d` against reference `c`.
    Score {
        /// Corpus file (JSON array of count arrays).
        #[arg(long)]
        corpus: PathBuf,

        /// Candidate vector.
        #[arg(long)]
        d: String,

        /// Reference vector.
        #[arg(long)]
        c: String,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Rank every corpus member against a query vector.
    Rank {
        /// Corpus file (JSON array of count arrays).
        #[arg(long)]
        corpus: PathBuf,

        /// Query vector (scored as the candidate).
        #[arg(long)]
        query: String,

        /// Top-k results to return.
        #[arg(short = 'n', long, default_value_t = 10)]
        top_k: usize,

        /// Scoring function.
        #[arg(long, value_enum, default_value_t = Scorer::Bm25)]
        scorer: Scorer,

        #[command(flatten)]
        params: ParamArgs,
    },
}

#[cfg(feature = "cli")]
#[derive(clap::Args, Debug)]
struct ParamArgs {
    /// JSON file with `{"k": .., "b": ..}`; missing fields take defaults.
    #[arg(long = "params")]
    params_file: Option<PathBuf>,

    /// Override `k`.
    #[arg(long)]
    k: Option<f64>,

    /// Override `b`.
    #[arg(long)]
    b: Option<f64>,
}

#[cfg(feature = "cli")]
impl ParamArgs {
    fn resolve(&self) -> Result<RankerParams, Box<dyn std::error::Error>> {
        let mut params = match &self.params_file {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => RankerParams::default(),
        };
        if let Some(k) = self.k {
            params.k = k;
        }
        if let Some(b) = self.b {
            params.b = b;
        }
        Ok(params)
    }
}

#[cfg(feature = "cli")]
fn load_corpus(path: &Path) -> Result<Vec<Vec<u32>>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "cli")]
    {
        env_logger::init();
        let args = Args::parse();

        match args.command {
            Commands::Align { a, b } => {
                let a: Vec<serde_json::Value> = serde_json::from_str(&a)?;
                let b: Vec<serde_json::Value> = serde_json::from_str(&b)?;
                println!(
                    "lcs={} levenshtein={}",
                    align_lcs(&a, &b),
                    align_levenshtein(&a, &b)
                );
            }
            Commands::Intervals { pitches } => {
                let pitches: Vec<i32> = serde_json::from_str(&pitches)?;
                println!("{}", serde_json::to_string(&melodic_intervals(&pitches))?);
            }
            Commands::Vectorize { seq, start, end } => {
                let seq: Vec<i32> = serde_json::from_str(&seq)?;
                let v = vectorize_fixed_range(&seq, start, end)?;
                println!("{}", serde_json::to_string(&v)?);
            }
            Commands::Score {
                corpus,
                d,
                c,
                params,
            } => {
                let corpus = load_corpus(&corpus)?;
                let ranker = Ranker::new(&corpus, params.resolve()?)?;
                let d: Vec<u32> = serde_json::from_str(&d)?;
                let c: Vec<u32> = serde_json::from_str(&c)?;
                println!(
                    "bm25={:.6} pln={:.6}",
                    ranker.score_bm25(&d, &c)?,
                    ranker.score_pln(&d, &c)?
                );
            }
            Commands::Rank {
                corpus,
                query,
                top_k,
                scorer,
                params,
            } => {
                let corpus = load_corpus(&corpus)?;
                let ranker = Ranker::new(&corpus, params.resolve()?)?;
                let query: Vec<u32> = serde_json::from_str(&query)?;
                for (position, score) in ranker.rank(scorer, &query, top_k)? {
                    println!("{position}\t{score:.6}");
                }
            }
        }
    }

    #[cfg(not(feature = "cli"))]
    println!("CLI feature is disabled. Build with --features cli to enable.");

    Ok(())
}
