//! Subword-tokenizer - High-level tokenizer API
//!
//! This crate provides a user-friendly interface for word-level BPE,
//! integrating training, merge rules, vocabulary and encoding into a single
//! type.
//!
//! # Features
//!
//! - Simple builder pattern for tokenizer configuration
//! - Training on pre-split words, with the final corpus reported back
//! - Encoding, decoding and vocabulary id lookup for unseen words
//! - LRU cache for repeated words
//!
//! # Example
//!
//! ```rust
//! use subword_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().max_merges(10).build()?;
//! tokenizer.train(&["low", "lower", "newest", "widest"])?;
//!
//! let encoded = tokenizer.encode("lowest");
//! assert_eq!(encoded, vec!["low", "est</w>"]);
//! assert_eq!(tokenizer.decode(&encoded), "lowest");
//! # Ok::<(), subword_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use subword_core::{Pair, Result, Symbol, TokenizerError, Vocabulary, Word, END_OF_WORD};
pub use subword_training::{StopReason, TrainingConfig, TrainingOutcome};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// Utilities
pub mod utils;
pub use utils::{CacheStats, EncodingCache};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
