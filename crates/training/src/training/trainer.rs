//! BPE trainer implementation.
//!
//! Training is a strict sequential chain: every step recounts the pairs of
//! the corpus produced by the previous step, merges the best one everywhere,
//! and records it. The ordered list of merged pairs is the trained model.

use super::counter::PairCounter;
use std::fmt;
use subword_core::{prepare_corpus, Corpus, MergeCandidate, Pair, Result, TokenizerError};

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Maximum number of merges to learn
    pub max_merges: usize,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_merges: 10,
            min_frequency: 1,
        }
    }
}

impl TrainingConfig {
    /// Create a configuration with the given merge budget.
    pub fn with_max_merges(max_merges: usize) -> Self {
        Self {
            max_merges,
            ..Default::default()
        }
    }

    /// Set the maximum number of merges.
    pub fn max_merges(mut self, max_merges: usize) -> Self {
        self.max_merges = max_merges;
        self
    }

    /// Set the minimum pair frequency.
    pub fn min_frequency(mut self, min_frequency: u64) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    /// Check the configuration before any work starts.
    pub fn validate(&self) -> Result<()> {
        if self.min_frequency == 0 {
            return Err(TokenizerError::InvalidConfig(
                "min_frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Convert a signed merge budget from outside the library.
///
/// Negative budgets are rejected before any training work is done.
pub fn merge_budget(requested: i64) -> Result<usize> {
    usize::try_from(requested).map_err(|_| {
        TokenizerError::InvalidInput(format!(
            "max merges must be non-negative, got {requested}"
        ))
    })
}

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All requested merges were learned
    BudgetReached,
    /// No adjacent pairs were left in the corpus
    NoPairs,
    /// The best remaining pair was below `min_frequency`
    BelowMinFrequency,
}

impl StopReason {
    /// Whether training ended before learning the requested number of merges.
    pub fn is_early(&self) -> bool {
        !matches!(self, StopReason::BudgetReached)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::BudgetReached => write!(f, "merge budget reached"),
            StopReason::NoPairs => write!(f, "no pairs left to merge"),
            StopReason::BelowMinFrequency => write!(f, "best pair below minimum frequency"),
        }
    }
}

/// Result of a training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingOutcome {
    /// Corpus after all learned merges were applied
    pub corpus: Corpus,
    /// Learned merges, in order (index = rank)
    pub merges: Vec<Pair>,
    /// Why training stopped
    pub stop_reason: StopReason,
}

impl TrainingOutcome {
    /// Split into the final corpus and the ordered merges.
    pub fn into_parts(self) -> (Corpus, Vec<Pair>) {
        (self.corpus, self.merges)
    }
}

/// BPE trainer.
///
/// Learns merge rules from pre-split words by iteratively merging the most
/// frequent adjacent symbol pair.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer with a merge budget and default settings.
    pub fn with_max_merges(max_merges: usize) -> Self {
        Self::new(TrainingConfig::with_max_merges(max_merges))
    }

    /// Get the configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on raw words.
    ///
    /// # Arguments
    /// * `words` - Pre-split words; repeats count as extra frequency
    pub fn train<S: AsRef<str>>(&self, words: &[S]) -> Result<TrainingOutcome> {
        self.train_corpus(prepare_corpus(words))
    }

    /// Train on an already prepared corpus.
    pub fn train_corpus(&self, corpus: Corpus) -> Result<TrainingOutcome> {
        self.config.validate()?;
        Ok(self.run(corpus))
    }

    fn run(&self, corpus: Corpus) -> TrainingOutcome {
        let mut counter = PairCounter::from_corpus(corpus);
        let mut merges: Vec<Pair> = Vec::with_capacity(self.config.max_merges.min(1 << 12));

        log::info!(
            "training on {} words ({} symbols), up to {} merges",
            counter.word_count(),
            counter.symbol_count(),
            self.config.max_merges
        );

        let mut stop_reason = StopReason::BudgetReached;

        while merges.len() < self.config.max_merges {
            let pair_counts = counter.count_pairs();

            let candidate = match MergeCandidate::best(&pair_counts) {
                Some(c) => c,
                None => {
                    stop_reason = StopReason::NoPairs;
                    break;
                }
            };

            if candidate.count < self.config.min_frequency {
                stop_reason = StopReason::BelowMinFrequency;
                break;
            }

            let merged = counter.merge_pair_in_words(&candidate.pair);
            log::debug!(
                "merge {}: {:?} + {:?} (count {}, {} occurrences merged)",
                merges.len(),
                candidate.pair.0,
                candidate.pair.1,
                candidate.count,
                merged
            );
            merges.push(candidate.pair);
        }

        log::info!(
            "learned {} of {} merges: {}",
            merges.len(),
            self.config.max_merges,
            stop_reason
        );

        TrainingOutcome {
            corpus: counter.into_words(),
            merges,
            stop_reason,
        }
    }
}

/// Learn up to `max_merges` merges from a prepared corpus.
///
/// Returns the rewritten corpus and the merges in the order learned. Fewer
/// than `max_merges` merges come back if the corpus runs out of pairs.
pub fn train(corpus: Corpus, max_merges: usize) -> (Corpus, Vec<Pair>) {
    BpeTrainer::with_max_merges(max_merges)
        .run(corpus)
        .into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use subword_core::{Symbol, END_OF_WORD};

    const REFERENCE_CORPUS: [&str; 4] = ["low", "lower", "newest", "widest"];

    fn pair(left: &str, right: &str) -> Pair {
        (Symbol::from(left), Symbol::from(right))
    }

    #[test]
    fn test_reference_merge_sequence() {
        let outcome = BpeTrainer::with_max_merges(10)
            .train(&REFERENCE_CORPUS)
            .unwrap();

        assert_eq!(
            outcome.merges,
            vec![
                pair("e", "s"),
                pair("es", "t"),
                pair("est", END_OF_WORD),
                pair("l", "o"),
                pair("lo", "w"),
                pair("d", "est</w>"),
                pair("e", "r"),
                pair("er", END_OF_WORD),
                pair("e", "w"),
                pair("ew", "est</w>"),
            ]
        );
        assert_eq!(outcome.stop_reason, StopReason::BudgetReached);
    }

    #[test]
    fn test_reference_final_corpus() {
        let (corpus, _) = train(prepare_corpus(REFERENCE_CORPUS), 10);

        assert_eq!(corpus[0], vec!["low", END_OF_WORD]);
        assert_eq!(corpus[1], vec!["low", "er</w>"]);
        assert_eq!(corpus[2], vec!["n", "ewest</w>"]);
        assert_eq!(corpus[3], vec!["w", "i", "dest</w>"]);
    }

    #[test]
    fn test_zero_merges_leaves_corpus() {
        let prepared = prepare_corpus(REFERENCE_CORPUS);
        let (corpus, merges) = train(prepared.clone(), 0);

        assert!(merges.is_empty());
        assert_eq!(corpus, prepared);
    }

    #[test]
    fn test_early_termination() {
        // "ab" collapses to a single symbol after two merges
        let outcome = BpeTrainer::with_max_merges(10).train(&["ab"]).unwrap();

        assert_eq!(outcome.merges.len(), 2);
        assert_eq!(outcome.corpus, vec![vec!["ab</w>"]]);
        assert_eq!(outcome.stop_reason, StopReason::NoPairs);
        assert!(outcome.stop_reason.is_early());
    }

    #[test]
    fn test_empty_input() {
        let words: [&str; 0] = [];
        let outcome = BpeTrainer::with_max_merges(5).train(&words).unwrap();

        assert!(outcome.merges.is_empty());
        assert!(outcome.corpus.is_empty());
        assert_eq!(outcome.stop_reason, StopReason::NoPairs);
    }

    #[test]
    fn test_empty_words_are_kept() {
        let outcome = BpeTrainer::with_max_merges(5).train(&["", "a"]).unwrap();

        assert_eq!(outcome.corpus[0], vec![END_OF_WORD]);
        assert_eq!(outcome.corpus[1], vec!["a</w>"]);
        assert_eq!(outcome.merges, vec![pair("a", END_OF_WORD)]);
    }

    #[test]
    fn test_repeated_words_weight_frequency() {
        // "xy" appears twice, so (x, y) outranks (a, b) despite sorting after it
        let outcome = BpeTrainer::with_max_merges(1)
            .train(&["ab", "xy", "xy"])
            .unwrap();

        assert_eq!(outcome.merges, vec![pair("x", "y")]);
    }

    #[test]
    fn test_min_frequency_filter() {
        let config = TrainingConfig::default().max_merges(100).min_frequency(2);
        let outcome = BpeTrainer::new(config)
            .train(&REFERENCE_CORPUS)
            .unwrap();

        assert_eq!(outcome.stop_reason, StopReason::BelowMinFrequency);
        assert_eq!(outcome.merges.len(), 5);
    }

    #[test]
    fn test_zero_min_frequency_rejected() {
        let config = TrainingConfig::default().min_frequency(0);
        let result = BpeTrainer::new(config).train(&REFERENCE_CORPUS);

        assert!(matches!(result, Err(TokenizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_merge_budget() {
        assert_eq!(merge_budget(0), Ok(0));
        assert_eq!(merge_budget(10), Ok(10));
        assert!(matches!(
            merge_budget(-1),
            Err(TokenizerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_training_is_deterministic() {
        let first = BpeTrainer::with_max_merges(10).train(&REFERENCE_CORPUS).unwrap();
        let second = BpeTrainer::with_max_merges(10).train(&REFERENCE_CORPUS).unwrap();

        assert_eq!(first, second);
    }
}
