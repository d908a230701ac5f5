//! Encoding cache for repeated words.
//!
//! Natural text repeats the same words constantly, so caching the encoding of
//! recently seen words skips most merge passes.

use ahash::AHashMap;
use std::collections::VecDeque;
use subword_core::{Result, TokenizerError, Word};

/// LRU cache of word -> encoded symbols.
///
/// When the cache exceeds capacity, the least recently used entry is evicted.
#[derive(Debug, Clone)]
pub struct EncodingCache {
    /// The cache storing word -> encoded symbols
    cache: AHashMap<String, Word>,
    /// Maximum number of entries in the cache
    capacity: usize,
    /// Recency order, least recently used at the front
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl EncodingCache {
    /// Default number of cached words.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create a new encoding cache with the given capacity.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries to store; must be non-zero
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TokenizerError::InvalidConfig(
                "cache capacity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            cache: AHashMap::with_capacity(capacity),
            capacity,
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        })
    }

    /// Create a new encoding cache with [`EncodingCache::DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self {
            cache: AHashMap::with_capacity(Self::DEFAULT_CAPACITY),
            capacity: Self::DEFAULT_CAPACITY,
            order: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            hits: 0,
            misses: 0,
        }
    }

    /// Get the cached encoding or compute it with the provided function.
    ///
    /// # Arguments
    /// * `word` - The word to encode
    /// * `encoder` - Function to compute the encoding if not cached
    pub fn get_or_encode<F>(&mut self, word: &str, encoder: F) -> Result<Word>
    where
        F: FnOnce(&str) -> Result<Word>,
    {
        if let Some(cached) = self.cache.get(word).cloned() {
            self.hits += 1;
            self.touch(word);
            return Ok(cached);
        }

        self.misses += 1;
        let encoded = encoder(word)?;
        self.insert(word.to_string(), encoded.clone());

        Ok(encoded)
    }

    /// Look up a word without encoding it.
    pub fn get(&self, word: &str) -> Option<&Word> {
        self.cache.get(word)
    }

    /// Move `word` to the most recently used position.
    fn touch(&mut self, word: &str) {
        if let Some(pos) = self.order.iter().position(|w| w == word) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }

    /// Insert a value into the cache.
    fn insert(&mut self, key: String, value: Word) {
        if self.cache.contains_key(&key) {
            self.touch(&key);
            self.cache.insert(key, value);
            return;
        }

        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.cache.remove(&oldest);
                }
                None => break,
            }
        }

        self.cache.insert(key.clone(), value);
        self.order.push_back(key);
    }

    /// Clear all entries from the cache and reset statistics.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get the cache capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resize the cache.
    ///
    /// If the new capacity is smaller than the current size,
    /// least recently used entries are evicted.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity == 0 {
            return Err(TokenizerError::InvalidConfig(
                "cache capacity must be at least 1".to_string(),
            ));
        }

        self.capacity = new_capacity;
        while self.order.len() > new_capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.cache.remove(&oldest);
            }
        }

        Ok(())
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            entries: self.cache.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            hit_rate: (lookups > 0).then(|| self.hits as f64 / lookups as f64),
        }
    }
}

impl Default for EncodingCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to encode
    pub misses: u64,
    /// Cache hit rate (None before the first lookup)
    pub hit_rate: Option<f64>,
}
