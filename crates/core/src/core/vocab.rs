//! Vocabulary projected from the learned merge rules.
//!
//! The vocabulary is never edited directly. Each merge rule at rank `i`
//! contributes the token `left + right` with id `i`.

use crate::core::merges::{merged_symbol, Pair};
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Read-only vocabulary with forward and reverse mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> token string
    vocab_r: VocabR,
}

impl Vocabulary {
    /// Build the vocabulary from an ordered list of merge rules.
    ///
    /// If two ranks produce the same token string, the later rank wins and
    /// the earlier id is dropped from the reverse mapping.
    pub fn from_merges<'a>(merges: impl IntoIterator<Item = &'a Pair>) -> Self {
        let merges = merges.into_iter();
        let capacity = merges.size_hint().0;
        let mut vocab = Vocab::with_capacity(capacity);
        let mut vocab_r = VocabR::with_capacity(capacity);

        for (rank, pair) in merges.enumerate() {
            let id = rank as u32;
            let token = merged_symbol(pair);

            if let Some(previous) = vocab.insert(token.clone(), id) {
                log::warn!("merge rank {id} repeats token {token:?} from rank {previous}");
                vocab_r.remove(&previous);
            }
            vocab_r.insert(id, token);
        }

        Self { vocab, vocab_r }
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Like [`Vocabulary::get_id`], but unknown tokens are an error.
    pub fn id_of(&self, token: &str) -> Result<u32> {
        self.get_id(token)
            .ok_or_else(|| TokenizerError::UnknownToken(token.to_string()))
    }

    /// Like [`Vocabulary::get_token`], but unknown IDs are an error.
    pub fn token_of(&self, id: u32) -> Result<&str> {
        self.get_token(id).ok_or(TokenizerError::UnknownTokenId(id))
    }

    /// Check whether a token string is in the vocabulary.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.vocab.contains_key(token)
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Tokens and their IDs, sorted by ID.
    pub fn entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .vocab
            .iter()
            .map(|(token, &id)| (token.as_str(), id))
            .collect();
        entries.sort_unstable_by_key(|&(_, id)| id);
        entries
    }

    /// Borrow the forward mapping.
    pub fn as_map(&self) -> &Vocab {
        &self.vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::{Symbol, END_OF_WORD};

    fn pair(left: &str, right: &str) -> Pair {
        (Symbol::from(left), Symbol::from(right))
    }

    #[test]
    fn test_from_merges() {
        let merges = vec![pair("e", "s"), pair("es", "t"), pair("est", END_OF_WORD)];
        let vocab = Vocabulary::from_merges(&merges);

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get_id("es"), Some(0));
        assert_eq!(vocab.get_id("est"), Some(1));
        assert_eq!(vocab.get_id("est</w>"), Some(2));
        assert_eq!(vocab.get_token(1), Some("est"));
        assert_eq!(vocab.get_id("e"), None);
    }

    #[test]
    fn test_empty_merges() {
        let vocab = Vocabulary::from_merges(&Vec::new());
        assert!(vocab.is_empty());
        assert!(vocab.entries().is_empty());
    }

    #[test]
    fn test_collision_is_last_write_wins() {
        // Same token "abc" from two different pairs
        let merges = vec![pair("ab", "c"), pair("x", "y"), pair("a", "bc")];
        let vocab = Vocabulary::from_merges(&merges);

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get_id("abc"), Some(2));
        assert_eq!(vocab.get_token(0), None);
        assert_eq!(vocab.get_token(2), Some("abc"));
    }

    #[test]
    fn test_entries_sorted_by_id() {
        let merges = vec![pair("l", "o"), pair("lo", "w"), pair("e", "r")];
        let vocab = Vocabulary::from_merges(&merges);

        assert_eq!(vocab.entries(), vec![("lo", 0), ("low", 1), ("er", 2)]);
    }

    #[test]
    fn test_strict_lookups() {
        let merges = vec![pair("l", "o")];
        let vocab = Vocabulary::from_merges(&merges);

        assert_eq!(vocab.id_of("lo"), Ok(0));
        assert_eq!(
            vocab.id_of("zz"),
            Err(TokenizerError::UnknownToken("zz".to_string()))
        );
        assert_eq!(vocab.token_of(0), Ok("lo"));
        assert_eq!(vocab.token_of(9), Err(TokenizerError::UnknownTokenId(9)));
    }
}
