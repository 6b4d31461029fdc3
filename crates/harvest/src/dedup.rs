// ABOUTME: Article deduplication over an explicit insertion-ordered map keyed by link (or title).
// ABOUTME: Later duplicates overwrite values but keep the first-seen position; output is capped.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::result::ArticleCandidate;

/// A map that remembers the order keys were first inserted.
///
/// Re-inserting an existing key replaces its value in place. Iteration order
/// never depends on hashing.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    slots: HashMap<K, usize>,
    entries: Vec<V>,
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Inserts or overwrites; returns true if the key was new.
    pub fn upsert(&mut self, key: K, value: V) -> bool {
        match self.slots.get(&key) {
            Some(&idx) => {
                self.entries[idx] = value;
                false
            }
            None => {
                self.slots.insert(key, self.entries.len());
                self.entries.push(value);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values in first-insertion order.
    pub fn into_values(self) -> Vec<V> {
        self.entries
    }
}

impl<K: Hash + Eq, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapses candidates sharing a dedup key and keeps the first `cap`.
///
/// Each key keeps the position of its first occurrence and the fields of its
/// last occurrence.
pub fn dedup_articles(candidates: Vec<ArticleCandidate>, cap: usize) -> Vec<ArticleCandidate> {
    let total = candidates.len();
    let mut unique = OrderedMap::new();
    for candidate in candidates {
        unique.upsert(candidate.dedup_key().to_string(), candidate);
    }

    let distinct = unique.len();
    let mut articles = unique.into_values();
    articles.truncate(cap);

    debug!(total, distinct, kept = articles.len(), "deduplicated articles");
    articles
}
