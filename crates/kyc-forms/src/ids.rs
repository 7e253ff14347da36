//! Identity sources for pages and rows
//!
//! Ids are `{namespace}-{unique}`. The namespace names the list a row or page
//! belongs to; the unique part comes from the injected source.

use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use ulid::{Generator, Ulid};

/// Source of session-unique identifiers
pub trait IdSource: Send + Sync + Debug {
    /// Next id within `namespace`
    fn next_id(&self, namespace: &str) -> String;
}

/// Id source shared between the page list and row groups
pub type SharedIdSource = Arc<dyn IdSource>;

/// Monotonic ULID ids (default)
pub struct UlidIdSource {
    generator: Mutex<Generator>,
}

impl UlidIdSource {
    /// Create new source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            generator: Mutex::new(Generator::new()),
        }
    }

    /// Create shared source
    #[inline]
    #[must_use]
    pub fn shared() -> SharedIdSource {
        Arc::new(Self::new())
    }
}

impl Default for UlidIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for UlidIdSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UlidIdSource").finish_non_exhaustive()
    }
}

impl IdSource for UlidIdSource {
    fn next_id(&self, namespace: &str) -> String {
        // Overflow within one millisecond falls back to a fresh random ULID
        let ulid = self.generator.lock().generate().unwrap_or_else(|_| Ulid::new());
        format!("{namespace}-{}", ulid.to_string().to_lowercase())
    }
}

/// Counter-based ids for deterministic tests and replays
#[derive(Debug)]
pub struct SequentialIdSource {
    next: AtomicU64,
}

impl SequentialIdSource {
    /// Start counting at `start`
    #[inline]
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Create shared source counting from 1
    #[inline]
    #[must_use]
    pub fn shared() -> SharedIdSource {
        Arc::new(Self::default())
    }
}

impl Default for SequentialIdSource {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self, namespace: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{namespace}-{n}")
    }
}
