//! Ordering of merge candidates during training.
//!
//! Several pairs often share the highest count. To keep training reproducible
//! the winner is chosen by a fixed total order, which is part of the model
//! contract:
//!
//! 1. higher count wins;
//! 2. on equal counts, the lexicographically smaller concatenation
//!    `left + right` (byte order) wins;
//! 3. if the concatenations are equal, the smaller `left` symbol wins.

use crate::core::merges::Pair;
use std::cmp::Ordering;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbols to merge
    pub pair: Pair,
    /// The frequency of this pair across the corpus
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }

    /// Compare two `(pair, count)` entries by merge priority without cloning.
    ///
    /// `Ordering::Greater` means `a` should be merged first.
    pub fn compare(a: (&Pair, u64), b: (&Pair, u64)) -> Ordering {
        let (pair_a, count_a) = a;
        let (pair_b, count_b) = b;

        count_a
            .cmp(&count_b)
            .then_with(|| concat_bytes(pair_b).cmp(concat_bytes(pair_a)))
            .then_with(|| pair_b.0.cmp(&pair_a.0))
    }

    /// Pick the highest-priority entry out of a pair frequency table.
    ///
    /// Returns `None` if the table is empty.
    pub fn best<'a, I>(counts: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a Pair, &'a u64)>,
    {
        counts
            .into_iter()
            .max_by(|&(pa, &ca), &(pb, &cb)| Self::compare((pa, ca), (pb, cb)))
            .map(|(pair, &count)| Self::new(pair.clone(), count))
    }
}

fn concat_bytes(pair: &Pair) -> impl Iterator<Item = u8> + '_ {
    pair.0.bytes().chain(pair.1.bytes())
}

// Higher priority = greater, so `max()` picks the next merge
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::compare((&self.pair, self.count), (&other.pair, other.count))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
