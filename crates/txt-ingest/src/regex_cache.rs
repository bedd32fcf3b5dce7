//! Compiled pattern cache.
//!
//! Every pattern a run uses (record separators, field separators, line
//! patterns, and the patterns passed to `match`/`find`/`replace`/`split` from
//! template text) is compiled through one [`RegexCache`]. The runner owns the
//! cache and hands an `Arc` to each component that needs it.
//!
//! Lookups take a shared read lock. A miss takes the write lock, checks again,
//! then compiles and inserts, so two callers racing on the same new pattern
//! compile it once. Failed compiles are never stored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use regex::Regex;

use crate::error::{IngestError, Result};

/// Hit/miss counters for a [`RegexCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that compiled a new pattern.
    pub misses: u64,
}

/// Process-lifetime cache of compiled patterns keyed by their source text.
#[derive(Debug, Default)]
pub struct RegexCache {
    patterns: RwLock<HashMap<String, Arc<Regex>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RegexCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled form of `pattern`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Pattern`] naming the pattern when it does not
    /// compile. The failure is not cached; a later call retries.
    pub fn compile(&self, pattern: &str) -> Result<Arc<Regex>> {
        {
            let patterns = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(regex) = patterns.get(pattern) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(pattern, "regex cache hit");
                return Ok(Arc::clone(regex));
            }
        }

        let mut patterns = self
            .patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(regex) = patterns.get(pattern) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(regex));
        }

        let regex = Regex::new(pattern).map_err(|e| IngestError::pattern(pattern, e))?;
        let regex = Arc::new(regex);
        patterns.insert(pattern.to_string(), Arc::clone(&regex));
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(pattern, cached = patterns.len(), "compiled pattern");
        Ok(regex)
    }

    /// Number of distinct patterns currently cached.
    pub fn len(&self) -> usize {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no pattern has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `pattern` has been compiled and cached.
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(pattern)
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
