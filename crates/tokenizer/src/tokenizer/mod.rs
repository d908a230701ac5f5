//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties together
//! training, the learned merge list, its rank index, and the vocabulary.

use crate::utils::{CacheStats, EncodingCache};
use subword_core::{
    decode, Pair, Result, Symbol, TokenizerError, Vocabulary, Word, WordEncoder,
};
use subword_training::{BpeTrainer, TrainingConfig, TrainingOutcome};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Training configuration (merge budget, minimum frequency)
    pub training: TrainingConfig,
    /// Capacity for encoding cache
    pub cache_capacity: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            training: TrainingConfig::default(),
            cache_capacity: EncodingCache::DEFAULT_CAPACITY,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of merges learned by [`Tokenizer::train`].
    pub fn max_merges(mut self, max_merges: usize) -> Self {
        self.config.training.max_merges = max_merges;
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.training.min_frequency = freq;
        self
    }

    /// Set the encoding cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Build an untrained tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// Main tokenizer struct.
///
/// Owns the ordered merge list (the whole learned model) together with the
/// projections derived from it. Every projection is rebuilt whenever the merge
/// list changes, so they can never disagree.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Learned merges, in order (index = rank)
    merges: Vec<Pair>,
    /// Pair -> rank index over `merges`
    encoder: WordEncoder,
    /// Token -> id projection of `merges`
    vocab: Vocabulary,
    /// Configuration
    config: TokenizerConfig,
    /// Cache of recent encodings
    cache: EncodingCache,
}

impl Tokenizer {
    /// Create a new, untrained tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        config.training.validate()?;
        let cache = EncodingCache::with_capacity(config.cache_capacity)?;

        Ok(Self {
            merges: Vec::new(),
            encoder: WordEncoder::default(),
            vocab: Vocabulary::default(),
            config,
            cache,
        })
    }

    /// Create a tokenizer from an already learned merge list.
    pub fn from_merges(merges: Vec<Pair>, config: TokenizerConfig) -> Result<Self> {
        let mut tokenizer = Self::new(config)?;
        tokenizer.set_merges(merges);
        Ok(tokenizer)
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Train on pre-split words, replacing any previously learned merges.
    ///
    /// Returns the training outcome, including the rewritten corpus.
    pub fn train<S: AsRef<str>>(&mut self, words: &[S]) -> Result<TrainingOutcome> {
        let trainer = BpeTrainer::new(self.config.training.clone());
        let outcome = trainer.train(words)?;
        self.set_merges(outcome.merges.clone());
        Ok(outcome)
    }

    fn set_merges(&mut self, merges: Vec<Pair>) {
        self.encoder = WordEncoder::from_merges(&merges);
        self.vocab = Vocabulary::from_merges(&merges);
        self.merges = merges;
        self.cache.clear();
        log::debug!(
            "tokenizer holds {} merges, {} vocabulary entries",
            self.merges.len(),
            self.vocab.len()
        );
    }

    /// Encode a single word.
    pub fn encode(&self, word: &str) -> Word {
        self.encoder.encode(word)
    }

    /// Encode a single word, consulting the encoding cache first.
    pub fn encode_cached(&mut self, word: &str) -> Word {
        let encoder = &self.encoder;
        match self
            .cache
            .get_or_encode(word, |w| Ok::<_, TokenizerError>(encoder.encode(w)))
        {
            Ok(encoded) => encoded,
            Err(_) => encoder.encode(word),
        }
    }

    /// Encode a batch of words, in order.
    pub fn encode_words<S: AsRef<str>>(&self, words: &[S]) -> Vec<Word> {
        words.iter().map(|w| self.encode(w.as_ref())).collect()
    }

    /// Recover the word an encoding came from.
    pub fn decode(&self, symbols: &[Symbol]) -> String {
        decode(symbols)
    }

    /// Map each symbol to its vocabulary id.
    ///
    /// Symbols that are not merged tokens (single characters, the bare
    /// end-of-word marker) map to `None`.
    pub fn token_ids(&self, symbols: &[Symbol]) -> Vec<Option<u32>> {
        symbols.iter().map(|s| self.vocab.get_id(s)).collect()
    }

    /// Get the learned merges, in rank order.
    pub fn merges(&self) -> &[Pair] {
        &self.merges
    }

    /// Get the number of learned merges.
    pub fn num_merges(&self) -> usize {
        self.merges.len()
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Get encoding cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subword_core::END_OF_WORD;
    use subword_training::StopReason;

    const REFERENCE_CORPUS: [&str; 4] = ["low", "lower", "newest", "widest"];

    fn trained() -> Tokenizer {
        let mut tokenizer = Tokenizer::builder().max_merges(10).build().unwrap();
        tokenizer.train(&REFERENCE_CORPUS).unwrap();
        tokenizer
    }

    #[test]
    fn test_builder() {
        let tokenizer = Tokenizer::builder()
            .max_merges(42)
            .min_frequency(3)
            .cache_capacity(8)
            .build()
            .unwrap();

        assert_eq!(tokenizer.config().training.max_merges, 42);
        assert_eq!(tokenizer.config().training.min_frequency, 3);
        assert_eq!(tokenizer.cache_stats().capacity, 8);
        assert_eq!(tokenizer.num_merges(), 0);
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        assert!(Tokenizer::builder().cache_capacity(0).build().is_err());
        assert!(Tokenizer::builder().min_frequency(0).build().is_err());
    }

    #[test]
    fn test_untrained_tokenizer_splits_characters() {
        let tokenizer = Tokenizer::builder().build().unwrap();
        assert_eq!(tokenizer.encode("ab"), vec!["a", "b", END_OF_WORD]);
        assert!(tokenizer.vocab().is_empty());
    }

    #[test]
    fn test_train_and_encode() {
        let mut tokenizer = Tokenizer::builder().max_merges(10).build().unwrap();
        let outcome = tokenizer.train(&REFERENCE_CORPUS).unwrap();

        assert_eq!(outcome.stop_reason, StopReason::BudgetReached);
        assert_eq!(tokenizer.num_merges(), 10);
        assert_eq!(tokenizer.vocab_size(), 10);
        assert_eq!(tokenizer.encode("lowest"), vec!["low", "est</w>"]);
    }

    #[test]
    fn test_encode_matches_trained_corpus() {
        let mut tokenizer = Tokenizer::builder().max_merges(10).build().unwrap();
        let outcome = tokenizer.train(&REFERENCE_CORPUS).unwrap();

        assert_eq!(tokenizer.encode_words(&REFERENCE_CORPUS), outcome.corpus);
    }

    #[test]
    fn test_vocabulary_ids() {
        let tokenizer = trained();
        let vocab = tokenizer.vocab();

        assert_eq!(vocab.get_id("es"), Some(0));
        assert_eq!(vocab.get_id("low"), Some(4));
        assert_eq!(vocab.get_id("ewest</w>"), Some(9));
    }

    #[test]
    fn test_token_ids() {
        let tokenizer = trained();
        let encoded = tokenizer.encode("lowest");

        assert_eq!(tokenizer.token_ids(&encoded), vec![Some(4), Some(2)]);
        assert_eq!(
            tokenizer.token_ids(&tokenizer.encode("low")),
            vec![Some(4), None]
        );
    }

    #[test]
    fn test_decode() {
        let tokenizer = trained();
        for word in ["lowest", "widest", "unseen"] {
            assert_eq!(tokenizer.decode(&tokenizer.encode(word)), word);
        }
    }

    #[test]
    fn test_encode_cached() {
        let mut tokenizer = trained();

        let first = tokenizer.encode_cached("lowest");
        let second = tokenizer.encode_cached("lowest");

        assert_eq!(first, second);
        assert_eq!(first, tokenizer.encode("lowest"));
        assert_eq!(tokenizer.cache_stats().hits, 1);
        assert_eq!(tokenizer.cache_stats().misses, 1);
    }

    #[test]
    fn test_retraining_clears_cache() {
        let mut tokenizer = trained();
        tokenizer.encode_cached("lowest");

        tokenizer.train(&["aaaa"]).unwrap();

        assert_eq!(tokenizer.cache_stats().entries, 0);
        assert_eq!(
            tokenizer.encode_cached("lowest"),
            vec!["l", "o", "w", "e", "s", "t", END_OF_WORD]
        );
    }

    #[test]
    fn test_from_merges() {
        let merges = trained().merges().to_vec();
        let tokenizer = Tokenizer::from_merges(merges, TokenizerConfig::default()).unwrap();

        assert_eq!(tokenizer.encode("lower"), vec!["low", "er</w>"]);
    }
}
