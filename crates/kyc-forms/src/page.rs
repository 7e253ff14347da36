//! Form kinds and page descriptors

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Page identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Wrap an existing id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The five form types of the onboarding document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    /// Authorized person with client name and signature rights
    AuthorizedPerson,
    /// Generic additional person
    Person,
    /// Wallet and bank account designees
    WalletBank,
    /// Lynx user interface and API portal access rights
    LynxApi,
    /// Scope of authority signatures
    ScopeAuthority,
}

impl FormKind {
    /// All kinds in document order
    pub const ALL: [FormKind; 5] = [
        FormKind::AuthorizedPerson,
        FormKind::Person,
        FormKind::WalletBank,
        FormKind::LynxApi,
        FormKind::ScopeAuthority,
    ];

    /// Short slug used as id namespace
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::AuthorizedPerson => "authorized",
            Self::Person => "person",
            Self::WalletBank => "wallet",
            Self::LynxApi => "lynx",
            Self::ScopeAuthority => "scope",
        }
    }

    /// Parse a slug back into a kind
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Heading printed on the rendered form
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AuthorizedPerson => "AUTHORIZED PERSONS",
            Self::Person => "PERSON",
            Self::WalletBank => "WALLET & BANK ACCOUNT",
            Self::LynxApi => "LYNX & API ACCESS",
            Self::ScopeAuthority => "SCOPE OF AUTHORITY",
        }
    }

    /// Whether duplicated pages are numbered instead of marked as copies
    #[inline]
    #[must_use]
    pub const fn is_person_like(self) -> bool {
        matches!(self, Self::AuthorizedPerson | Self::Person)
    }

    /// Label for the `n`-th page of a person-like kind
    #[must_use]
    pub fn numbered_label(self, n: usize) -> Option<String> {
        match self {
            Self::AuthorizedPerson => Some(format!("Authorized Person {n}")),
            Self::Person => Some(format!("Person {n}")),
            _ => None,
        }
    }
}

impl Display for FormKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One page of the onboarding document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPageDescriptor {
    /// Page identity
    pub id: PageId,
    /// Form type rendered on this page
    pub kind: FormKind,
    /// Display label
    pub label: String,
    /// Person number of a person-like page (primary page is person 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_number: Option<u32>,
}

impl FormPageDescriptor {
    /// Create descriptor without a person number
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<PageId>, kind: FormKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            person_number: None,
        }
    }

    /// Set the person number
    #[inline]
    #[must_use]
    pub fn with_person_number(mut self, n: u32) -> Self {
        self.person_number = Some(n);
        self
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_roundtrip() {
        for kind in FormKind::ALL {
            assert_eq!(FormKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(FormKind::from_slug("unknown"), None);
    }

    #[test]
    fn person_like_kinds() {
        assert!(FormKind::AuthorizedPerson.is_person_like());
        assert!(FormKind::Person.is_person_like());
        assert!(!FormKind::WalletBank.is_person_like());
        assert_eq!(FormKind::LynxApi.numbered_label(2), None);
        assert_eq!(
            FormKind::Person.numbered_label(4).as_deref(),
            Some("Person 4")
        );
    }

    #[test]
    fn person_number_is_stored_not_parsed() {
        let page = FormPageDescriptor::new("a", FormKind::AuthorizedPerson, "Authorized Person 12");
        assert_eq!(page.person_number, None);
        assert_eq!(page.clone().with_person_number(3).person_number, Some(3));

        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("person_number").is_none());
        let back: FormPageDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&FormKind::AuthorizedPerson).unwrap();
        assert_eq!(json, "\"authorized-person\"");
    }
}
