//! Pair counting for BPE training.
//!
//! Counts are frequency-weighted by repetition: a word that appears twice in
//! the corpus contributes its pairs twice.

use ahash::AHashMap;
use subword_core::{merge_pair_in_word, prepare_word, Corpus, Pair, Word};

/// Pair frequency table: pair -> number of adjacent occurrences.
pub type PairCounts = AHashMap<Pair, u64>;

/// Count adjacent symbol pairs across every word of a corpus.
///
/// Words of length 0 or 1 contribute nothing, and pairs never span words.
pub fn count_pairs(corpus: &[Word]) -> PairCounts {
    let mut pair_counts = PairCounts::new();

    for word in corpus {
        for window in word.windows(2) {
            *pair_counts
                .entry((window[0].clone(), window[1].clone()))
                .or_insert(0) += 1;
        }
    }

    pair_counts
}

/// Number of adjacent-pair occurrences in a corpus (the sum of all counts).
pub fn pair_occurrences(corpus: &[Word]) -> usize {
    corpus.iter().map(|word| word.len().saturating_sub(1)).sum()
}

/// Working corpus for BPE training.
///
/// Owns the prepared words, in input order, and rewrites them in place as
/// merges are learned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCounter {
    /// Prepared words, in corpus order
    words: Corpus,
}

impl PairCounter {
    /// Create a new, empty pair counter.
    pub fn new() -> Self {
        Self { words: Corpus::new() }
    }

    /// Create a pair counter over an already prepared corpus.
    pub fn from_corpus(words: Corpus) -> Self {
        Self { words }
    }

    /// Add text to be processed for pair counting.
    ///
    /// The text is split on whitespace and every piece is added as a word.
    pub fn add_text(&mut self, text: &str) {
        for word in text.split_whitespace() {
            self.add_word(word);
        }
    }

    /// Add a single word to the counter.
    pub fn add_word(&mut self, word: &str) {
        self.words.push(prepare_word(word));
    }

    /// Count all pairs in the current words.
    pub fn count_pairs(&self) -> PairCounts {
        count_pairs(&self.words)
    }

    /// Get the number of words (duplicates included).
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total number of symbols across all words.
    pub fn symbol_count(&self) -> usize {
        self.words.iter().map(Vec::len).sum()
    }

    /// Get a reference to the words.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Take the words out of the counter.
    pub fn into_words(self) -> Corpus {
        self.words
    }

    /// Clear all data from the counter.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Merge a pair in all words (mutates words in place).
    ///
    /// Returns the number of occurrences merged.
    pub fn merge_pair_in_words(&mut self, pair: &Pair) -> usize {
        self.words
            .iter_mut()
            .map(|word| merge_pair_in_word(word, pair))
            .sum()
    }
}
