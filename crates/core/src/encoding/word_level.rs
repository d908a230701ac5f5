//! Word-level BPE encoding.
//!
//! A word is split into characters plus the end-of-word marker, then merged
//! one rule at a time. Each pass picks the lowest-ranked rule among the pairs
//! currently adjacent in the word and collapses all of its non-overlapping
//! occurrences, left to right. Encoding stops when no adjacent pair is a rule.

use crate::core::merges::{merge_pair_in_word, MergeRules, Pair};
use crate::core::symbol::{prepare_word, Symbol, Word, END_OF_WORD};

/// Word-level BPE encoder.
///
/// Holds the pair -> rank index, built once and reused across calls.
#[derive(Debug, Clone, Default)]
pub struct WordEncoder {
    /// Merge rules: pair -> rank
    rules: MergeRules,
}

impl WordEncoder {
    /// Create an encoder from an existing rank index.
    pub fn new(rules: MergeRules) -> Self {
        Self { rules }
    }

    /// Create an encoder from an ordered list of merges.
    pub fn from_merges<'a>(merges: impl IntoIterator<Item = &'a Pair>) -> Self {
        Self::new(MergeRules::from_pairs(merges))
    }

    /// Borrow the rank index.
    pub fn rules(&self) -> &MergeRules {
        &self.rules
    }

    /// Encode a single word.
    ///
    /// Characters never seen in training simply stay single-character symbols.
    pub fn encode(&self, word: &str) -> Word {
        let mut symbols = prepare_word(word);
        self.apply_merges(&mut symbols);
        symbols
    }

    /// Apply merge rules to an already prepared word.
    pub fn apply_merges(&self, symbols: &mut Word) {
        let mut passes = 0usize;

        while let Some((rank, pair)) = self.best_pair(symbols) {
            let merged = merge_pair_in_word(symbols, &pair);
            passes += 1;
            log::trace!(
                "pass {passes}: merged {:?} + {:?} (rank {rank}) x{merged}",
                pair.0,
                pair.1
            );
        }
    }

    /// The lowest-ranked rule among the pairs adjacent in `symbols`.
    fn best_pair(&self, symbols: &[Symbol]) -> Option<(u32, Pair)> {
        symbols
            .windows(2)
            .filter_map(|window| {
                self.rules
                    .rank_of(&window[0], &window[1])
                    .map(|rank| (rank, window))
            })
            .min_by_key(|&(rank, _)| rank)
            .map(|(rank, window)| (rank, (window[0].clone(), window[1].clone())))
    }
}

/// Encode `word` with an ordered list of merges.
///
/// Builds a throwaway index; reuse a [`WordEncoder`] when encoding many words.
pub fn encode_word(word: &str, merges: &[Pair]) -> Word {
    WordEncoder::from_merges(merges).encode(word)
}

/// Recover the original word from an encoding.
///
/// Concatenates the symbols and strips the trailing end-of-word marker.
pub fn decode(symbols: &[Symbol]) -> String {
    let mut text = String::with_capacity(symbols.iter().map(|s| s.len()).sum());
    for symbol in symbols {
        text.push_str(symbol);
    }
    if text.ends_with(END_OF_WORD) {
        text.truncate(text.len() - END_OF_WORD.len());
    }
    text
}
