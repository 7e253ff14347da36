//! KYC Storage
//!
//! Small durable lists that outlive a form session.
//!
//! # Core Concepts
//!
//! - [`ListRepository`]: Injected key → list-of-strings store
//! - [`MemoryRepository`] / [`FileRepository`]: Repository implementations
//! - [`SuggestionStore`]: Per-field autocomplete history (dedup, capped)
//! - [`PositionRegistry`]: Built-in + custom position list with change broadcast
//!
//! Storage failures never reach callers of the stores: reads fall back to an
//! empty list and writes are dropped, both with an `error!` log line.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kyc_storage::{MemoryRepository, SuggestionStore};
//!
//! let store = SuggestionStore::new(Arc::new(MemoryRepository::new()));
//! store.commit("city", "Zug");
//! store.commit("city", "Zug");
//! assert_eq!(store.history("city"), vec!["Zug".to_string()]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod positions;
pub mod repository;
pub mod suggestions;

// Re-exports
pub use error::{PositionError, StorageError};
pub use positions::{PositionRegistry, PositionsChanged, BUILTIN_POSITIONS, CUSTOM_POSITIONS_KEY};
pub use repository::{FileRepository, ListRepository, MemoryRepository, SharedRepository};
pub use suggestions::{SuggestionStore, DEFAULT_HISTORY_CAPACITY, HISTORY_KEY_PREFIX};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
