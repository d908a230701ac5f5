//! Subword-training - BPE training infrastructure
//!
//! This crate learns ranked merge rules from a corpus of pre-split words.
//!
//! # Features
//!
//! - Frequency-weighted pair counting over the whole corpus
//! - Deterministic merge selection with a fixed tie-break order
//! - Early termination reported through [`StopReason`]
//!
//! # Example
//!
//! ```rust
//! use subword_training::{BpeTrainer, StopReason};
//!
//! let trainer = BpeTrainer::with_max_merges(10);
//! let outcome = trainer.train(&["low", "lower", "newest", "widest"])?;
//!
//! assert_eq!(outcome.merges.len(), 10);
//! assert_eq!(outcome.stop_reason, StopReason::BudgetReached);
//! # Ok::<(), subword_training::TokenizerError>(())
//! ```

pub use subword_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    count_pairs, merge_budget, pair_occurrences, train, BpeTrainer, PairCounter, PairCounts,
    StopReason, TrainingConfig, TrainingOutcome,
};
