//! Benchmark command implementation.

use clap::Parser;

use super::corpus::CorpusArgs;

/// Benchmark command arguments.
#[derive(Parser, Debug)]
pub struct BenchmarkCommand {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Whitespace-separated words file to encode (training words if omitted)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::{ensure, Result as AnyhowResult};
use std::fs;
use std::time::{Duration, Instant};

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    ensure!(cmd.iterations > 0, "iterations must be at least 1");

    let training_words = cmd.corpus.words(&[])?;

    let start = Instant::now();
    let (mut tokenizer, _) = cmd.corpus.train(&training_words)?;
    let training_time = start.elapsed();

    let words: Vec<String> = match &cmd.input {
        Some(path) => fs::read_to_string(path)?
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        None => training_words,
    };

    println!("Benchmarking encoding...");
    println!("  Words: {}", words.len());
    println!("  Merges: {}", tokenizer.num_merges());
    println!("  Iterations: {}", cmd.iterations);
    println!("  Training time: {:.3}s", training_time.as_secs_f64());
    println!();

    // Warmup
    let _ = tokenizer.encode_words(&words);

    let uncached = time_iterations(cmd.iterations, || {
        let _ = tokenizer.encode_words(&words);
    });
    let cached = time_iterations(cmd.iterations, || {
        for word in &words {
            let _ = tokenizer.encode_cached(word);
        }
    });

    report("Uncached", uncached, cmd.iterations, words.len());
    report("Cached", cached, cmd.iterations, words.len());

    let stats = tokenizer.cache_stats();
    println!(
        "  Cache: {} entries, hit rate {:.1}%",
        stats.entries,
        stats.hit_rate.unwrap_or(0.0) * 100.0
    );

    Ok(())
}

fn time_iterations(iterations: usize, mut f: impl FnMut()) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    start.elapsed()
}

fn report(label: &str, elapsed: Duration, iterations: usize, words: usize) {
    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    let words_per_sec = (words * iterations) as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!("{label}:");
    println!("  Total time: {:.3}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_ms);
    println!("  Throughput: {:.0} words/s", words_per_sec);
}
