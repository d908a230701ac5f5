//! Training infrastructure for BPE tokenizers.
//!
//! This module provides pair statistics and the merge loop that learns
//! ranked merge rules from pre-split words.

pub mod counter;
pub mod trainer;

pub use counter::{count_pairs, pair_occurrences, PairCounter, PairCounts};
pub use trainer::{merge_budget, train, BpeTrainer, StopReason, TrainingConfig, TrainingOutcome};
