//! Additional persons beneath the primary authorized-person page
//!
//! Person #1 is the primary authorized person itself, so the first
//! additional person is #2.

use serde::{Deserialize, Serialize};

/// Ordered person numbers of the additional-person sub-list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalPersons {
    numbers: Vec<u32>,
}

impl AdditionalPersons {
    /// First number handed out
    pub const FIRST_NUMBER: u32 = 2;

    /// Create empty sub-list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Person numbers in display order
    #[inline]
    #[must_use]
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    /// Number the next `add` will use
    #[must_use]
    pub fn next_number(&self) -> u32 {
        self.numbers
            .iter()
            .max()
            .map_or(Self::FIRST_NUMBER, |max| max + 1)
    }

    /// Append the next person number and return it
    pub fn add(&mut self) -> u32 {
        let n = self.next_number();
        self.numbers.push(n);
        tracing::debug!(person = n, "added additional person");
        n
    }

    /// Remove a person number; returns `true` if it was present
    pub fn remove(&mut self, n: u32) -> bool {
        let before = self.numbers.len();
        self.numbers.retain(|&p| p != n);
        before != self.numbers.len()
    }

    /// Number of additional persons
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Check if there are no additional persons
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
