//! Core BPE data structures.
//!
//! This module contains the value types shared by training and encoding:
//! symbols and prepared words, merge rules, candidate ordering, and the
//! vocabulary projection.

pub mod merges;
pub mod priority;
pub mod symbol;
pub mod vocab;

pub use merges::{merge_pair_in_word, merged_symbol, MergeMap, MergeRules, MergeStats, Pair};
pub use priority::MergeCandidate;
pub use symbol::{prepare_corpus, prepare_word, Corpus, Symbol, Word, END_OF_WORD};
pub use vocab::{Vocab, VocabR, Vocabulary};
