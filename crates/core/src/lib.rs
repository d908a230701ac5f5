//! Subword-core - Core word-level BPE data structures
//!
//! This crate provides the fundamental pieces of word-level byte-pair
//! encoding: symbols and prepared words, merge rules ranked by the order they
//! were learned, the vocabulary projected from those rules, and the encoder
//! that applies them to unseen words.
//!
//! # Features
//!
//! - Symbols stored as `CompactString`, so short subwords never allocate
//! - O(1) pair → rank lookups through `AHashMap`
//! - A fixed, total tie-break order for merge candidates
//! - Error handling with `thiserror`
//!
//! # Example
//!
//! ```rust
//! use subword_core::{encode_word, Pair, Symbol, END_OF_WORD};
//!
//! let merges: Vec<Pair> = vec![(Symbol::from("l"), Symbol::from("o"))];
//! let encoded = encode_word("low", &merges);
//! assert_eq!(encoded, vec!["lo", "w", END_OF_WORD]);
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data structures
pub mod core;
pub use crate::core::{
    merge_pair_in_word, merged_symbol, prepare_corpus, prepare_word, Corpus, MergeCandidate,
    MergeMap, MergeRules, MergeStats, Pair, Symbol, Vocab, VocabR, Vocabulary, Word, END_OF_WORD,
};

// Encoding of unseen words
pub mod encoding;
pub use encoding::{decode, encode_word, WordEncoder};
