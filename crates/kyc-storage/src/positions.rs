//! Position registry
//!
//! Built-in function/position options plus user-added custom positions.
//! The effective list is always built-in first, then custom, in insertion
//! order. Every mutation is broadcast to subscribers, which re-read
//! [`PositionRegistry::all`] instead of receiving a diff.

use crate::error::PositionError;
use crate::repository::{load_or_empty, store_or_drop, SharedRepository};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Key holding the custom position list
pub const CUSTOM_POSITIONS_KEY: &str = "customPositions";

/// Built-in positions, never removable
pub const BUILTIN_POSITIONS: &[&str] = &[
    "Chief Executive Officer (CEO)",
    "Chief Financial Officer (CFO)",
    "Chief Technology Officer (CTO)",
    "Chief Operating Officer (COO)",
    "Managing Director",
    "Director",
    "Vice President",
    "Senior Manager",
    "Manager",
    "Team Lead",
    "Analyst",
    "Consultant",
    "Administrator",
    "Coordinator",
];

const CHANNEL_CAPACITY: usize = 16;

/// Notification that the merged position list changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionsChanged {
    /// Monotonic mutation counter of the emitting registry
    pub revision: u64,
}

/// Registry of built-in and custom positions
#[derive(Debug)]
pub struct PositionRegistry {
    repo: SharedRepository,
    builtin: Vec<String>,
    revision: AtomicU64,
    events: broadcast::Sender<PositionsChanged>,
}

impl PositionRegistry {
    /// Create registry over the standard built-in list
    #[must_use]
    pub fn new(repo: SharedRepository) -> Self {
        Self::with_builtin(repo, BUILTIN_POSITIONS.iter().map(|p| (*p).to_string()))
    }

    /// Create registry over a custom built-in list
    #[must_use]
    pub fn with_builtin(repo: SharedRepository, builtin: impl IntoIterator<Item = String>) -> Self {
        let (events, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            repo,
            builtin: builtin.into_iter().collect(),
            revision: AtomicU64::new(0),
            events,
        }
    }

    /// Built-in positions
    #[inline]
    #[must_use]
    pub fn builtin(&self) -> &[String] {
        &self.builtin
    }

    /// User-added positions, in insertion order
    #[must_use]
    pub fn custom(&self) -> Vec<String> {
        load_or_empty(self.repo.as_ref(), CUSTOM_POSITIONS_KEY)
    }

    /// Effective list: built-in first, then custom
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut all = self.builtin.clone();
        all.extend(self.custom());
        all
    }

    /// Check whether a position is offered (exact, case-sensitive)
    #[must_use]
    pub fn contains(&self, position: &str) -> bool {
        self.builtin.iter().any(|p| p == position) || self.custom().iter().any(|p| p == position)
    }

    /// Add a custom position
    ///
    /// Returns the stored (trimmed) position.
    ///
    /// # Errors
    /// - `PositionError::Empty` if the input is blank
    /// - `PositionError::Duplicate` if it already exists in the merged list
    pub fn add(&self, position: &str) -> Result<String, PositionError> {
        let position = position.trim();
        if position.is_empty() {
            return Err(PositionError::Empty);
        }

        let mut custom = self.custom();
        if self.builtin.iter().any(|p| p == position) || custom.iter().any(|p| p == position) {
            return Err(PositionError::Duplicate(position.to_string()));
        }

        custom.push(position.to_string());
        store_or_drop(self.repo.as_ref(), CUSTOM_POSITIONS_KEY, &custom);
        tracing::debug!(position, "added custom position");
        self.notify();
        Ok(position.to_string())
    }

    /// Remove a custom position
    ///
    /// Built-in positions are not removable. Returns `true` if a custom entry
    /// was removed.
    pub fn remove(&self, position: &str) -> bool {
        let mut custom = self.custom();
        let before = custom.len();
        custom.retain(|p| p != position);
        if custom.len() == before {
            return false;
        }

        store_or_drop(self.repo.as_ref(), CUSTOM_POSITIONS_KEY, &custom);
        tracing::debug!(position, "removed custom position");
        self.notify();
        true
    }

    /// Subscribe to change notifications
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PositionsChanged> {
        self.events.subscribe()
    }

    /// Number of mutations so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }

    fn notify(&self) {
        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        // No subscribers is fine
        let _ = self.events.send(PositionsChanged { revision });
    }
}
