//! Compare one litigated pair of melodies with every measure in the crate.

use melodyrank::{
    align_lcs, align_levenshtein, interval_bounds, measure_tokens, melodic_intervals,
    vectorize_fixed_range, Ranker, RankerParams, Scorer, Vocabulary,
};

fn main() -> Result<(), melodyrank::Error> {
    // Diatonic pitch numbers of four short melodies; works 0 and 1 are the disputed pair.
    let works: Vec<Vec<i32>> = vec![
        vec![30, 32, 34, 32, 30, 29, 30, 32],
        vec![30, 32, 34, 32, 31, 29, 30, 30],
        vec![27, 31, 29, 33, 35, 34, 31, 27],
        vec![32, 32, 31, 30, 29, 28, 29, 30],
    ];
    let melodies: Vec<Vec<i32>> = works.iter().map(|w| melodic_intervals(w)).collect();

    // --- String baselines (LCS: higher is closer; Levenshtein: lower is closer) ---
    println!("=== Alignment ===");
    println!("  LCS         = {}", align_lcs(&melodies[0], &melodies[1]));
    println!("  Levenshtein = {}", align_levenshtein(&melodies[0], &melodies[1]));

    // --- Interval vectors over the observed range ---
    let (lo, hi) = interval_bounds(&melodies).unwrap_or((-20, 20));
    let corpus: Vec<Vec<u32>> = melodies
        .iter()
        .map(|m| vectorize_fixed_range(m, lo, hi))
        .collect::<Result<_, _>>()?;

    println!("\n=== Relevance (range [{lo}, {hi}]) ===");
    let ranker = Ranker::new(&corpus, RankerParams::default())?;
    println!("  avdl = {:.3}", ranker.stats().avdl());
    println!("  bm25(d=1, c=0) = {:.4}", ranker.score_bm25(&corpus[1], &corpus[0])?);
    println!("  bm25(d=0, c=1) = {:.4}", ranker.score_bm25(&corpus[0], &corpus[1])?);
    println!("  pln (d=1, c=0) = {:.4}", ranker.score_pln(&corpus[1], &corpus[0])?);

    // avdl from raw melody length instead of vector mass.
    let by_len = Ranker::with_reference_lengths(
        &corpus,
        melodies.iter().map(Vec::len),
        RankerParams::default(),
    )?;
    println!("  bm25 (reference avdl) = {:.4}", by_len.score_bm25(&corpus[1], &corpus[0])?);

    println!("\n=== Closest works to work 1 ===");
    for (position, score) in ranker.rank(Scorer::PivotedLengthNormalization, &corpus[1], 3)? {
        println!("  work {position}: {score:.4}");
    }

    // --- "Vertical" tokens: one pitch-class word per two-note measure ---
    println!("\n=== Measure tokens ===");
    let docs: Vec<Vec<String>> = works
        .iter()
        .map(|w| measure_tokens(&w.chunks(2).collect::<Vec<_>>()))
        .collect();
    let vocab = Vocabulary::from_documents(docs.iter().map(Vec::as_slice));
    let vectors: Vec<Vec<u32>> = docs.iter().map(|d| vocab.vectorize(d)).collect();
    let vertical = Ranker::new(&vectors, RankerParams::default())?;
    println!("  vocabulary size = {}", vocab.len());
    println!("  bm25(d=1, c=0) = {:.4}", vertical.score_bm25(&vectors[1], &vectors[0])?);
    Ok(())
}
