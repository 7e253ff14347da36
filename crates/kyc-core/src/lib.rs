//! KYC Core
//!
//! Session layer of the onboarding form builder.
//!
//! # Core Concepts
//!
//! - [`OnboardingSession`]: Pages, their form instances, additional persons and stores
//! - [`OnboardingConfig`]: TOML configuration of storage, suggestions and export
//! - [`AutocompleteField`]: When a typed value is committed to the suggestion history
//! - [`Settings`]: Accent color from a fixed palette
//!
//! # Example
//!
//! ```rust
//! use kyc_core::{OnboardingConfig, OnboardingSession};
//! use kyc_forms::PageId;
//!
//! let mut session = OnboardingSession::open(OnboardingConfig::default()).unwrap();
//! assert_eq!(session.pages().len(), 4);
//!
//! session.duplicate_page(&PageId::from("auth-1"));
//! assert_eq!(session.pages()[1].label, "Authorized Person 2");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod autocomplete;
pub mod config;
pub mod error;
pub mod session;
pub mod settings;

// Re-exports
pub use autocomplete::{digits_only, AutocompleteField, InputFilter};
pub use config::OnboardingConfig;
pub use error::{ConfigError, OnboardingError, Result};
pub use session::{FormTarget, OnboardingSession};
pub use settings::{AccentColor, Settings, ACCENT_PALETTE, DEFAULT_ACCENT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
