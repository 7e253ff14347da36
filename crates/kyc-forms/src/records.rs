//! Field values of the five form types

use crate::page::FormKind;
use crate::rights::{API_RIGHTS, LYNX_RIGHTS};
use crate::rows::RowGroup;
use serde::{Deserialize, Serialize};

/// Maximum nationalities per person
pub const MAX_NATIONALITIES: usize = 3;

/// Requested change for a person
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    /// Not chosen yet
    #[default]
    #[serde(rename = "")]
    Unset,
    /// Add the person
    Add,
    /// Update the person
    Update,
    /// Remove the person
    Remove,
}

/// Signature authority of a person
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignaturePower {
    /// Not chosen yet
    #[default]
    #[serde(rename = "")]
    Unset,
    /// No signature power
    None,
    /// Sole signature
    Sole,
    /// Joint signature (two persons)
    Jointly,
}

/// Free-text field of a person form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Date of birth as entered
    DateOfBirth,
    /// Passport or ID card number
    IdDocument,
    /// Street and house number
    Street,
    /// Postal code
    ZipCode,
    /// City
    City,
    /// Country of residence
    Country,
    /// Business email address
    BusinessEmail,
    /// Business phone number
    BusinessPhone,
    /// Mobile phone number
    MobilePhone,
    /// Position in the client organisation
    Position,
    /// Encoded signature image
    Signature,
}

impl PersonField {
    /// Every field in form order
    pub const ALL: [PersonField; 13] = [
        PersonField::FirstName,
        PersonField::LastName,
        PersonField::DateOfBirth,
        PersonField::IdDocument,
        PersonField::Street,
        PersonField::ZipCode,
        PersonField::City,
        PersonField::Country,
        PersonField::BusinessEmail,
        PersonField::BusinessPhone,
        PersonField::MobilePhone,
        PersonField::Position,
        PersonField::Signature,
    ];

    /// Field key used in error maps
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::DateOfBirth => "dateOfBirth",
            Self::IdDocument => "idDocument",
            Self::Street => "street",
            Self::ZipCode => "zipCode",
            Self::City => "city",
            Self::Country => "country",
            Self::BusinessEmail => "businessEmail",
            Self::BusinessPhone => "businessPhone",
            Self::MobilePhone => "mobilePhone",
            Self::Position => "position",
            Self::Signature => "signature",
        }
    }

    /// Parse a field key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Whether committed values feed the suggestion history
    #[must_use]
    pub const fn remembers_history(self) -> bool {
        matches!(self, Self::Street | Self::City | Self::Country)
    }
}

/// Personal details shared by authorized-person and person forms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Date of birth as entered
    pub date_of_birth: String,
    /// Passport or ID card number, digits only
    pub id_document: String,
    /// Up to [`MAX_NATIONALITIES`] nationalities, in entry order
    pub nationalities: Vec<String>,
    /// Street and house number
    pub street: String,
    /// Postal code, digits only
    pub zip_code: String,
    /// City
    pub city: String,
    /// Country of residence
    pub country: String,
    /// Business email address
    pub business_email: String,
    /// Business phone number
    pub business_phone: String,
    /// Mobile phone number
    pub mobile_phone: String,
    /// Position in the client organisation
    pub position: String,
    /// Signature authority
    pub signature_power: SignaturePower,
    /// Encoded signature image, empty when unsigned
    pub signature: String,
}

impl PersonDetails {
    /// Current value of a field
    #[must_use]
    pub fn get(&self, field: PersonField) -> &str {
        match field {
            PersonField::FirstName => &self.first_name,
            PersonField::LastName => &self.last_name,
            PersonField::DateOfBirth => &self.date_of_birth,
            PersonField::IdDocument => &self.id_document,
            PersonField::Street => &self.street,
            PersonField::ZipCode => &self.zip_code,
            PersonField::City => &self.city,
            PersonField::Country => &self.country,
            PersonField::BusinessEmail => &self.business_email,
            PersonField::BusinessPhone => &self.business_phone,
            PersonField::MobilePhone => &self.mobile_phone,
            PersonField::Position => &self.position,
            PersonField::Signature => &self.signature,
        }
    }

    /// Overwrite a field
    pub fn set(&mut self, field: PersonField, value: impl Into<String>) {
        let slot = match field {
            PersonField::FirstName => &mut self.first_name,
            PersonField::LastName => &mut self.last_name,
            PersonField::DateOfBirth => &mut self.date_of_birth,
            PersonField::IdDocument => &mut self.id_document,
            PersonField::Street => &mut self.street,
            PersonField::ZipCode => &mut self.zip_code,
            PersonField::City => &mut self.city,
            PersonField::Country => &mut self.country,
            PersonField::BusinessEmail => &mut self.business_email,
            PersonField::BusinessPhone => &mut self.business_phone,
            PersonField::MobilePhone => &mut self.mobile_phone,
            PersonField::Position => &mut self.position,
            PersonField::Signature => &mut self.signature,
        };
        *slot = value.into();
    }

    /// Add a nationality, ignoring duplicates and anything past the maximum
    ///
    /// Returns `true` if it was added.
    pub fn add_nationality(&mut self, nationality: &str) -> bool {
        let nationality = nationality.trim();
        if nationality.is_empty()
            || self.nationalities.len() >= MAX_NATIONALITIES
            || self.nationalities.iter().any(|n| n == nationality)
        {
            return false;
        }
        self.nationalities.push(nationality.to_string());
        true
    }

    /// Remove a nationality; returns `true` if it was present
    pub fn remove_nationality(&mut self, nationality: &str) -> bool {
        let before = self.nationalities.len();
        self.nationalities.retain(|n| n != nationality);
        before != self.nationalities.len()
    }
}

/// Authorized person form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedPersonRecord {
    /// Client the person acts for
    pub client_name: String,
    /// Requested change
    pub action: FormAction,
    /// Personal details
    #[serde(flatten)]
    pub details: PersonDetails,
}

/// Additional person form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// Requested change
    pub action: FormAction,
    /// Personal details
    #[serde(flatten)]
    pub details: PersonDetails,
}

/// Wallet and bank account designees
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletBankRecord {
    /// Designated persons, without rights
    pub persons: RowGroup,
}

impl Default for WalletBankRecord {
    fn default() -> Self {
        Self {
            persons: RowGroup::plain("wallet"),
        }
    }
}

/// Lynx user interface and API portal users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LynxApiRecord {
    /// Lynx user interface users
    pub lynx: RowGroup,
    /// API portal users
    pub api: RowGroup,
}

impl Default for LynxApiRecord {
    fn default() -> Self {
        Self {
            lynx: RowGroup::with_rights("lynx", LYNX_RIGHTS),
            api: RowGroup::with_rights("api", API_RIGHTS),
        }
    }
}

/// One signature line of the scope-of-authority form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    /// Signatory name
    pub name: String,
    /// Date of signing
    pub date: String,
    /// Place of signing
    pub place: String,
    /// Encoded signature image
    pub signature: String,
}

/// Scope of authority form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeAuthorityRecord {
    /// First signatory
    pub signature1: SignatureBlock,
    /// Second signatory
    pub signature2: SignatureBlock,
}

/// Field values of one form instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "kebab-case")]
pub enum FormRecord {
    /// Authorized person form
    AuthorizedPerson(AuthorizedPersonRecord),
    /// Additional person form
    Person(PersonRecord),
    /// Wallet and bank account form
    WalletBank(WalletBankRecord),
    /// Lynx and API access form
    LynxApi(LynxApiRecord),
    /// Scope of authority form
    ScopeAuthority(ScopeAuthorityRecord),
}

impl FormRecord {
    /// Empty record for a form kind
    #[must_use]
    pub fn blank(kind: FormKind) -> Self {
        match kind {
            FormKind::AuthorizedPerson => Self::AuthorizedPerson(AuthorizedPersonRecord::default()),
            FormKind::Person => Self::Person(PersonRecord::default()),
            FormKind::WalletBank => Self::WalletBank(WalletBankRecord::default()),
            FormKind::LynxApi => Self::LynxApi(LynxApiRecord::default()),
            FormKind::ScopeAuthority => Self::ScopeAuthority(ScopeAuthorityRecord::default()),
        }
    }

    /// Form kind of this record
    #[must_use]
    pub fn kind(&self) -> FormKind {
        match self {
            Self::AuthorizedPerson(_) => FormKind::AuthorizedPerson,
            Self::Person(_) => FormKind::Person,
            Self::WalletBank(_) => FormKind::WalletBank,
            Self::LynxApi(_) => FormKind::LynxApi,
            Self::ScopeAuthority(_) => FormKind::ScopeAuthority,
        }
    }

    /// Person details, for the two person forms
    #[must_use]
    pub fn details(&self) -> Option<&PersonDetails> {
        match self {
            Self::AuthorizedPerson(r) => Some(&r.details),
            Self::Person(r) => Some(&r.details),
            _ => None,
        }
    }

    /// Mutable person details, for the two person forms
    pub fn details_mut(&mut self) -> Option<&mut PersonDetails> {
        match self {
            Self::AuthorizedPerson(r) => Some(&mut r.details),
            Self::Person(r) => Some(&mut r.details),
            _ => None,
        }
    }

    /// Row groups of the form, in display order
    #[must_use]
    pub fn row_groups(&self) -> Vec<&RowGroup> {
        match self {
            Self::WalletBank(r) => vec![&r.persons],
            Self::LynxApi(r) => vec![&r.lynx, &r.api],
            _ => Vec::new(),
        }
    }

    /// Mutable row group by name
    pub fn row_group_mut(&mut self, name: &str) -> Option<&mut RowGroup> {
        match self {
            Self::WalletBank(r) => Some(&mut r.persons).filter(|g| g.name() == name),
            Self::LynxApi(r) => [&mut r.lynx, &mut r.api]
                .into_iter()
                .find(|g| g.name() == name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_matches_kind() {
        for kind in FormKind::ALL {
            assert_eq!(FormRecord::blank(kind).kind(), kind);
        }
    }

    #[test]
    fn field_keys_roundtrip() {
        for field in PersonField::ALL {
            assert_eq!(PersonField::from_key(field.key()), Some(field));
        }
    }

    #[test]
    fn details_set_get() {
        let mut details = PersonDetails::default();
        details.set(PersonField::City, "Zug");
        assert_eq!(details.get(PersonField::City), "Zug");
        assert_eq!(details.city, "Zug");
    }

    #[test]
    fn nationalities_are_capped_and_unique() {
        let mut details = PersonDetails::default();
        assert!(details.add_nationality("Swiss"));
        assert!(!details.add_nationality("Swiss"));
        assert!(details.add_nationality("German"));
        assert!(details.add_nationality("French"));
        assert!(!details.add_nationality("Italian"));
        assert_eq!(details.nationalities.len(), MAX_NATIONALITIES);
        assert!(details.remove_nationality("German"));
        assert!(details.add_nationality("Italian"));
    }

    #[test]
    fn row_groups_by_name() {
        let mut record = FormRecord::blank(FormKind::LynxApi);
        assert_eq!(record.row_groups().len(), 2);
        assert!(record.row_group_mut("api").unwrap().schema().is_some());
        assert!(record.row_group_mut("wallet").is_none());

        let mut wallet = FormRecord::blank(FormKind::WalletBank);
        assert!(wallet.row_group_mut("wallet").unwrap().schema().is_none());
        assert!(FormRecord::blank(FormKind::ScopeAuthority).row_groups().is_empty());
    }

    #[test]
    fn unset_enums_serialize_as_empty_string() {
        let record = AuthorizedPersonRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["action"], "");
        assert_eq!(json["signaturePower"], "");
        assert_eq!(json["clientName"], "");
    }
}
