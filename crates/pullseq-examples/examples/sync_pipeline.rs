//! Word statistics over a pull-shaped line reader.
//!
//! Usage: RUST_LOG=pullseq_core=debug cargo run --example sync_pipeline

use pullseq_chain::ext::SequenceExt;
use pullseq_chain::lambda::from_fn;
use pullseq_core::config::SeqConfig;
use pullseq_core::error::Result;
use pullseq_core::source::{BoxPullSource, IterSource, Source, SourceKind};
use pullseq_core::step::Step;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TEXT: &str = "the quick brown fox\njumps over\n\nthe lazy dog\nand keeps running";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pullseq_core=info".into()),
        )
        .init();

    let config = SeqConfig::from_env()
        .map_err(pullseq_core::error::SeqError::Other)?
        .with_label("lines");

    let lines: BoxPullSource<&str> = Box::new(IterSource::new(TEXT.lines()));
    let long_words = Source::with_config(SourceKind::Pull(lines), config)?
        .filter(|line| Ok(!line.is_empty()))
        .flat_map(|line| Ok(line.split_whitespace().collect::<Vec<_>>()))
        .filter(|word| Ok(word.len() > 3))
        .as_indexed_pairs()
        .map(|(i, word)| Ok(format!("{i}: {word}")))
        .to_vec()?;
    tracing::info!(count = long_words.len(), "long words");
    for entry in &long_words {
        println!("{entry}");
    }

    let total_len = Source::from_vec(TEXT.split_whitespace().collect())
        .map(|word: &str| Ok(word.len()))
        .reduce(|acc, len| Ok(acc + len), 0)?;
    println!("total letters: {total_len}");

    // Fibonacci from a closure, bounded by take.
    let (mut a, mut b) = (0u64, 1u64);
    let fib = from_fn(move || {
        let out = a;
        (a, b) = (b, a + b);
        Ok(Step::yielded(out))
    })
    .take(12)
    .to_vec()?;
    println!("fibonacci: {fib:?}");

    Ok(())
}
