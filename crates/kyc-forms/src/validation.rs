//! Field validation for the person forms
//!
//! Validation never blocks editing; it produces a map of field key to
//! message that the form shows next to the offending inputs.

use crate::records::{
    AuthorizedPersonRecord, FormRecord, PersonDetails, PersonField, PersonRecord,
    MAX_NATIONALITIES,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d*$").expect("valid regex"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s+\-()]*$").expect("valid regex"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Field key of the nationality list
pub const NATIONALITIES_KEY: &str = "nationalities";

/// Field key of the client name
pub const CLIENT_NAME_KEY: &str = "clientName";

/// Validation messages keyed by field, in key order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record a message; the first message for a field wins
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Message for a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Check if no field failed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Checks a record and reports per-field messages
pub trait Validator<R> {
    /// Validate every field
    fn validate(&self, record: &R) -> FieldErrors;

    /// Validate a single field, e.g. on blur
    fn validate_field(&self, record: &R, field: &str) -> Option<String> {
        self.validate(record).get(field).map(str::to_string)
    }
}

/// Rules for the authorized-person form
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizedPersonValidator;

/// Rules for the additional-person form
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonValidator;

impl Validator<AuthorizedPersonRecord> for AuthorizedPersonValidator {
    fn validate(&self, record: &AuthorizedPersonRecord) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if record.client_name.is_empty() {
            errors.insert(CLIENT_NAME_KEY, "Client name is required");
        }
        check_required(&record.details, &mut errors);
        errors
    }
}

impl Validator<PersonRecord> for PersonValidator {
    fn validate(&self, record: &PersonRecord) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_required(&record.details, &mut errors);
        check_formats(&record.details, &mut errors);
        errors
    }
}

/// Validate any form record; forms without rules always pass
#[must_use]
pub fn validate_record(record: &FormRecord) -> FieldErrors {
    match record {
        FormRecord::AuthorizedPerson(r) => AuthorizedPersonValidator.validate(r),
        FormRecord::Person(r) => PersonValidator.validate(r),
        _ => FieldErrors::default(),
    }
}

fn check_required(details: &PersonDetails, errors: &mut FieldErrors) {
    let required = [
        (PersonField::FirstName, "First name is required"),
        (PersonField::LastName, "Last name is required"),
        (PersonField::DateOfBirth, "Date of birth is required"),
    ];
    for (field, message) in required {
        if details.get(field).is_empty() {
            errors.insert(field.key(), message);
        }
    }

    if details.nationalities.is_empty() {
        errors.insert(NATIONALITIES_KEY, "At least one nationality is required");
    } else if details.nationalities.len() > MAX_NATIONALITIES {
        errors.insert(NATIONALITIES_KEY, "Maximum of 3 nationalities allowed");
    }
}

fn check_formats(details: &PersonDetails, errors: &mut FieldErrors) {
    if !DIGITS.is_match(&details.id_document) {
        errors.insert(
            PersonField::IdDocument.key(),
            "ID document number must contain only numbers",
        );
    }
    if !DIGITS.is_match(&details.zip_code) {
        errors.insert(PersonField::ZipCode.key(), "Zip code must contain only numbers");
    }
    if !details.business_email.is_empty() && !EMAIL.is_match(&details.business_email) {
        errors.insert(PersonField::BusinessEmail.key(), "Invalid email format");
    }
    for field in [PersonField::BusinessPhone, PersonField::MobilePhone] {
        if !PHONE.is_match(details.get(field)) {
            errors.insert(
                field.key(),
                "Phone number can only contain digits, spaces, +, -, ( )",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete_person() -> PersonRecord {
        let mut record = PersonRecord::default();
        record.details.first_name = "Anna".into();
        record.details.last_name = "Muster".into();
        record.details.date_of_birth = "1980-04-01".into();
        record.details.nationalities = vec!["Swiss".into()];
        record
    }

    #[test]
    fn complete_person_passes() {
        assert!(PersonValidator.validate(&complete_person()).is_empty());
    }

    #[test]
    fn blank_authorized_person_reports_required_fields() {
        let errors = AuthorizedPersonValidator.validate(&AuthorizedPersonRecord::default());
        let keys: Vec<&str> = errors.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["clientName", "dateOfBirth", "firstName", "lastName", "nationalities"]
        );
    }

    #[test]
    fn authorized_person_skips_format_rules() {
        let mut record = AuthorizedPersonRecord {
            client_name: "Acme AG".into(),
            ..AuthorizedPersonRecord::default()
        };
        record.details = complete_person().details;
        record.details.zip_code = "80-31".into();
        assert!(AuthorizedPersonValidator.validate(&record).is_empty());
    }

    #[test]
    fn format_rules() {
        let mut record = complete_person();
        record.details.id_document = "AB123".into();
        record.details.zip_code = "8001".into();
        record.details.business_email = "not-an-email".into();
        record.details.business_phone = "+41 (44) 123-45-67".into();
        record.details.mobile_phone = "call me".into();

        let errors = PersonValidator.validate(&record);
        assert_eq!(
            errors.get("idDocument"),
            Some("ID document number must contain only numbers")
        );
        assert_eq!(errors.get("zipCode"), None);
        assert_eq!(errors.get("businessEmail"), Some("Invalid email format"));
        assert_eq!(errors.get("businessPhone"), None);
        assert!(errors.get("mobilePhone").is_some());
    }

    #[test]
    fn empty_email_is_allowed() {
        let mut record = complete_person();
        record.details.business_email = String::new();
        assert_eq!(PersonValidator.validate_field(&record, "businessEmail"), None);
        record.details.business_email = "anna@example.ch".into();
        assert_eq!(PersonValidator.validate_field(&record, "businessEmail"), None);
    }

    #[test]
    fn too_many_nationalities() {
        let mut record = complete_person();
        record.details.nationalities = vec!["A".into(), "B".into(), "C".into(), "D".into()];
        assert_eq!(
            PersonValidator.validate_field(&record, NATIONALITIES_KEY).as_deref(),
            Some("Maximum of 3 nationalities allowed")
        );
    }

    #[test]
    fn forms_without_rules_pass() {
        use crate::page::FormKind;
        for kind in [FormKind::WalletBank, FormKind::LynxApi, FormKind::ScopeAuthority] {
            assert!(validate_record(&FormRecord::blank(kind)).is_empty());
        }
        assert!(!validate_record(&FormRecord::blank(FormKind::Person)).is_empty());
    }
}
