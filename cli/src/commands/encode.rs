//! Encode command implementation.

use clap::Parser;

use super::corpus::CorpusArgs;

/// Encode command arguments.
#[derive(Parser, Debug)]
pub struct EncodeCommand {
    /// Words to encode ("-" reads whitespace-separated words from stdin)
    #[arg(required = true)]
    pub words: Vec<String>,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Also print vocabulary ids ("-" for symbols that are not merged tokens)
    #[arg(long, default_value_t = false)]
    pub ids: bool,
}

use anyhow::Result as AnyhowResult;
use std::io::Read;

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let training_words = cmd.corpus.words(&[])?;
    let (mut tokenizer, _) = cmd.corpus.train(&training_words)?;

    // Read input words (from stdin if "-")
    let words: Vec<String> = if cmd.words.len() == 1 && cmd.words[0] == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer.split_whitespace().map(str::to_string).collect()
    } else {
        cmd.words
    };

    for word in &words {
        let encoded = tokenizer.encode_cached(word);
        let symbols: Vec<&str> = encoded.iter().map(|s| s.as_str()).collect();

        if cmd.ids {
            let ids: Vec<String> = tokenizer
                .token_ids(&encoded)
                .into_iter()
                .map(|id| id.map_or_else(|| "-".to_string(), |id| id.to_string()))
                .collect();
            println!("{}: {} [{}]", word, symbols.join(" "), ids.join(" "));
        } else {
            println!("{}: {}", word, symbols.join(" "));
        }
    }

    log::debug!("encoding cache: {:?}", tokenizer.cache_stats());

    Ok(())
}
