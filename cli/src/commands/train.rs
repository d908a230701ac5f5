//! Train command implementation.

use clap::Parser;

use super::corpus::CorpusArgs;

/// Train command arguments.
#[derive(Parser, Debug)]
pub struct TrainCommand {
    /// Words to train on (ignored when --corpus is given)
    pub words: Vec<String>,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Print a JSON report instead of plain text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

use anyhow::Result as AnyhowResult;
use serde::Serialize;
use std::time::Instant;
use subword_tokenizer::{Tokenizer, TrainingOutcome};

#[derive(Serialize)]
struct VocabEntry<'a> {
    token: &'a str,
    id: u32,
}

#[derive(Serialize)]
struct TrainReport<'a> {
    corpus: Vec<Vec<&'a str>>,
    merges: Vec<[&'a str; 2]>,
    vocabulary: Vec<VocabEntry<'a>>,
    stop_reason: String,
}

impl<'a> TrainReport<'a> {
    fn new(tokenizer: &'a Tokenizer, outcome: &'a TrainingOutcome) -> Self {
        Self {
            corpus: outcome
                .corpus
                .iter()
                .map(|word| word.iter().map(|s| s.as_str()).collect())
                .collect(),
            merges: tokenizer
                .merges()
                .iter()
                .map(|(left, right)| [left.as_str(), right.as_str()])
                .collect(),
            vocabulary: tokenizer
                .vocab()
                .entries()
                .into_iter()
                .map(|(token, id)| VocabEntry { token, id })
                .collect(),
            stop_reason: outcome.stop_reason.to_string(),
        }
    }
}

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let words = cmd.corpus.words(&cmd.words)?;

    let start = Instant::now();
    let (tokenizer, outcome) = cmd.corpus.train(&words)?;
    log::info!(
        "trained on {} words in {:.3}s",
        words.len(),
        start.elapsed().as_secs_f64()
    );

    let report = TrainReport::new(&tokenizer, &outcome);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("BPE tokenized corpus:");
    for word in &report.corpus {
        println!("{}", word.join(" "));
    }

    println!();
    println!("BPE vocabulary:");
    for entry in &report.vocabulary {
        println!("{}: {}", entry.token, entry.id);
    }

    if outcome.stop_reason.is_early() {
        println!();
        println!(
            "Stopped after {} merges: {}",
            tokenizer.num_merges(),
            outcome.stop_reason
        );
    }

    Ok(())
}
