//! Training input shared by the commands.

use anyhow::{Context, Result as AnyhowResult};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use subword_tokenizer::{Tokenizer, TrainingOutcome};
use subword_training::merge_budget;

/// Words used when no training input is given.
pub const REFERENCE_CORPUS: [&str; 4] = ["low", "lower", "newest", "widest"];

/// Training input and settings.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Whitespace-separated training words file (reference corpus if omitted)
    #[arg(short, long)]
    pub corpus: Option<PathBuf>,

    /// Number of merges to learn
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub merges: i64,

    /// Minimum pair frequency for a merge
    #[arg(long, default_value_t = 1)]
    pub min_frequency: u64,
}

impl CorpusArgs {
    /// Load the training words, falling back to `extra` and then the reference corpus.
    pub fn words(&self, extra: &[String]) -> AnyhowResult<Vec<String>> {
        if let Some(path) = &self.corpus {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read corpus {}", path.display()))?;
            return Ok(text.split_whitespace().map(str::to_string).collect());
        }

        if !extra.is_empty() {
            return Ok(extra.to_vec());
        }

        Ok(REFERENCE_CORPUS.iter().map(|w| w.to_string()).collect())
    }

    /// Build a tokenizer and train it on `words`.
    pub fn train(&self, words: &[String]) -> AnyhowResult<(Tokenizer, TrainingOutcome)> {
        let max_merges = merge_budget(self.merges)?;
        let mut tokenizer = Tokenizer::builder()
            .max_merges(max_merges)
            .min_frequency(self.min_frequency)
            .build()?;

        let outcome = tokenizer.train(words)?;
        if outcome.stop_reason.is_early() {
            log::warn!(
                "learned {} of {} merges: {}",
                outcome.merges.len(),
                max_merges,
                outcome.stop_reason
            );
        }

        Ok((tokenizer, outcome))
    }
}
