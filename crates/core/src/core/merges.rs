//! Merge rule management for BPE.
//!
//! The ordered list of learned pairs is the whole trained model. This module
//! provides the single-pass rewrite that applies one pair to a word, and an
//! index over the list for fast rank lookups during encoding.

use super::symbol::{Symbol, Word};
use ahash::AHashMap;

/// An ordered pair of adjacent symbols within one word.
pub type Pair = (Symbol, Symbol);

/// Merge rule mapping: pair -> rank (lower rank = higher priority).
pub type MergeMap = AHashMap<Pair, u32>;

/// The symbol produced by merging `pair`.
#[inline]
pub fn merged_symbol(pair: &Pair) -> Symbol {
    let mut merged = Symbol::with_capacity(pair.0.len() + pair.1.len());
    merged.push_str(&pair.0);
    merged.push_str(&pair.1);
    merged
}

/// Collapse every occurrence of `pair` in `word`, scanning left to right.
///
/// Occurrences never overlap: once a symbol is consumed by a merge it is not
/// looked at again in the same pass, so `a a a` with `(a, a)` becomes `aa a`.
///
/// Returns the number of merges performed.
pub fn merge_pair_in_word(word: &mut Word, pair: &Pair) -> usize {
    if word.len() < 2 {
        return 0;
    }

    let mut merged = 0;
    let mut out = Word::with_capacity(word.len());
    let mut symbols = std::mem::take(word).into_iter().peekable();

    while let Some(symbol) = symbols.next() {
        if symbol == pair.0 && symbols.peek() == Some(&pair.1) {
            symbols.next();
            out.push(merged_symbol(pair));
            merged += 1;
        } else {
            out.push(symbol);
        }
    }

    *word = out;
    merged
}

/// Merge rules indexed for O(1) rank lookups.
#[derive(Debug, Clone)]
pub struct MergeRules {
    /// Merge rules: pair -> rank
    merges: MergeMap,
    /// Maximum rank
    max_rank: u32,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self {
            merges: MergeMap::new(),
            max_rank: 0,
        }
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: MergeMap::with_capacity(capacity),
            max_rank: 0,
        }
    }

    /// Add a merge rule.
    ///
    /// If the pair is already known, its existing rank is kept: a pair's
    /// rank is its first position in the learned sequence.
    pub fn add_merge(&mut self, pair: Pair, rank: u32) {
        self.merges.entry(pair).or_insert(rank);
        self.max_rank = self.max_rank.max(rank);
    }

    /// Get the rank of a pair, if it is a merge rule.
    #[inline]
    pub fn get(&self, pair: &Pair) -> Option<u32> {
        self.merges.get(pair).copied()
    }

    /// Get the rank of the pair `(left, right)`.
    #[inline]
    pub fn rank_of(&self, left: &Symbol, right: &Symbol) -> Option<u32> {
        // Symbols up to 24 bytes are stored inline, so the clone is a copy
        self.get(&(left.clone(), right.clone()))
    }

    /// Check if a pair should be merged before another.
    ///
    /// Returns true if `pair` has higher priority (lower rank) than `other`.
    #[inline]
    pub fn should_merge_before(&self, pair: &Pair, other: &Pair) -> bool {
        match (self.get(pair), self.get(other)) {
            (Some(rank1), Some(rank2)) => rank1 < rank2,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// Get the number of distinct merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Create merge rules from an ordered list of pairs.
    ///
    /// The pairs are assigned ranks in order (0, 1, 2, ...).
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a Pair>) -> Self {
        let pairs = pairs.into_iter();
        let mut rules = Self::with_capacity(pairs.size_hint().0);

        for (rank, pair) in pairs.enumerate() {
            rules.add_merge(pair.clone(), rank as u32);
        }

        rules
    }
}

impl Default for MergeRules {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a Pair> for MergeRules {
    fn from_iter<T: IntoIterator<Item = &'a Pair>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// Statistics about merge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of merge rules
    pub count: usize,
    /// Maximum rank
    pub max_rank: u32,
    /// Minimum rank
    pub min_rank: u32,
    /// Length in bytes of the longest merged symbol
    pub longest_symbol: usize,
}

impl MergeRules {
    /// Get statistics about the merge rules.
    pub fn stats(&self) -> MergeStats {
        let min_rank = self.merges.values().copied().min().unwrap_or(0);
        let longest_symbol = self
            .merges
            .keys()
            .map(|(left, right)| left.len() + right.len())
            .max()
            .unwrap_or(0);

        MergeStats {
            count: self.len(),
            max_rank: self.max_rank,
            min_rank,
            longest_symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::{prepare_word, END_OF_WORD};

    fn pair(left: &str, right: &str) -> Pair {
        (Symbol::from(left), Symbol::from(right))
    }

    #[test]
    fn test_merged_symbol() {
        assert_eq!(merged_symbol(&pair("es", "t")), "est");
        assert_eq!(merged_symbol(&pair("t", END_OF_WORD)), "t</w>");
    }

    #[test]
    fn test_merge_pair_in_word() {
        let mut word = prepare_word("newest");
        let merged = merge_pair_in_word(&mut word, &pair("e", "s"));

        assert_eq!(merged, 1);
        assert_eq!(word, vec!["n", "e", "w", "es", "t", END_OF_WORD]);
    }

    #[test]
    fn test_merge_is_non_overlapping() {
        let mut word = prepare_word("aaa");
        let merged = merge_pair_in_word(&mut word, &pair("a", "a"));

        assert_eq!(merged, 1);
        assert_eq!(word, vec!["aa", "a", END_OF_WORD]);

        let mut word = prepare_word("aaaa");
        assert_eq!(merge_pair_in_word(&mut word, &pair("a", "a")), 2);
        assert_eq!(word, vec!["aa", "aa", END_OF_WORD]);
    }

    #[test]
    fn test_merge_absent_pair_leaves_word() {
        let mut word = prepare_word("low");
        let before = word.clone();

        assert_eq!(merge_pair_in_word(&mut word, &pair("x", "y")), 0);
        assert_eq!(word, before);
    }

    #[test]
    fn test_merge_short_words() {
        let mut word = prepare_word("");
        assert_eq!(merge_pair_in_word(&mut word, &pair("a", "b")), 0);
        assert_eq!(word, vec![END_OF_WORD]);

        let mut word = prepare_word("a");
        assert_eq!(merge_pair_in_word(&mut word, &pair("a", END_OF_WORD)), 1);
        assert_eq!(word, vec!["a</w>"]);
    }

    #[test]
    fn test_add_merge() {
        let mut rules = MergeRules::new();
        rules.add_merge(pair("a", "b"), 0);
        rules.add_merge(pair("b", "c"), 1);

        assert_eq!(rules.get(&pair("a", "b")), Some(0));
        assert_eq!(rules.get(&pair("b", "c")), Some(1));
        assert_eq!(rules.get(&pair("c", "d")), None);
        assert_eq!(rules.rank_of(&Symbol::from("b"), &Symbol::from("c")), Some(1));
    }

    #[test]
    fn test_duplicate_pair_keeps_first_rank() {
        let pairs = vec![pair("a", "b"), pair("c", "d"), pair("a", "b")];
        let rules = MergeRules::from_pairs(&pairs);

        assert_eq!(rules.get(&pair("a", "b")), Some(0));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_should_merge_before() {
        let pairs = vec![pair("a", "b"), pair("b", "c")];
        let rules: MergeRules = pairs.iter().collect();

        assert!(rules.should_merge_before(&pair("a", "b"), &pair("b", "c")));
        assert!(!rules.should_merge_before(&pair("b", "c"), &pair("a", "b")));
        assert!(rules.should_merge_before(&pair("a", "b"), &pair("x", "y")));
        assert!(!rules.should_merge_before(&pair("x", "y"), &pair("a", "b")));
    }

    #[test]
    fn test_stats() {
        let pairs = vec![pair("e", "s"), pair("es", "t"), pair("est", END_OF_WORD)];
        let stats = MergeRules::from_pairs(&pairs).stats();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_rank, 0);
        assert_eq!(stats.max_rank, 2);
        assert_eq!(stats.longest_symbol, "est</w>".len());
        assert_eq!(MergeRules::new().stats(), MergeStats::default());
    }
}
