//! Encoding of unseen words with learned merge rules.

pub mod word_level;

pub use word_level::{decode, encode_word, WordEncoder};
