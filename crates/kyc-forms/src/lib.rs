//! KYC Forms
//!
//! In-memory state of the onboarding document: which pages exist, what each
//! page contains, and the rules that keep that content consistent.
//!
//! # Core Concepts
//!
//! - [`PageList`]: Ordered form pages with duplicate, remove-to-bin and restore
//! - [`AdditionalPersons`]: Numbered persons attached to the primary page
//! - [`RowGroup`]: Add/Update/Remove lists of [`PersonRow`]s
//! - [`CapabilityRights`]: Per-row flags with a view-only exclusion group
//! - [`FormRecord`]: Field values of one form instance
//! - [`Validator`]: Per-field messages for the person forms
//!
//! # Example
//!
//! ```rust
//! use kyc_forms::{PageId, PageList, SequentialIdSource};
//!
//! let mut pages = PageList::with_default_pages(SequentialIdSource::shared());
//! let copy = pages.duplicate(&PageId::from("auth-1")).unwrap().clone();
//! assert_eq!(copy.label, "Authorized Person 2");
//! assert_eq!(pages.position(&copy.id), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod ids;
pub mod page;
pub mod pages;
pub mod persons;
pub mod records;
pub mod rights;
pub mod rows;
pub mod validation;

// Re-exports
pub use error::{PageListError, RowError};
pub use ids::{IdSource, SequentialIdSource, SharedIdSource, UlidIdSource};
pub use page::{FormKind, FormPageDescriptor, PageId};
pub use pages::{default_pages, PageList, PRIMARY_AUTHORIZED_PAGE};
pub use persons::AdditionalPersons;
pub use records::{
    AuthorizedPersonRecord, FormAction, FormRecord, LynxApiRecord, PersonDetails, PersonField,
    PersonRecord, ScopeAuthorityRecord, SignatureBlock, SignaturePower, WalletBankRecord,
    MAX_NATIONALITIES,
};
pub use rights::{
    CapabilityFlag, CapabilityRights, RightsSchema, API_RIGHTS, LYNX_RIGHTS, VIEW_ONLY,
};
pub use rows::{ChangeKind, PersonRow, RowField, RowGroup, RowId};
pub use validation::{
    validate_record, AuthorizedPersonValidator, FieldErrors, PersonValidator, Validator,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
