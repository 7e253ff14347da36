//! Repeatable person rows
//!
//! A [`RowGroup`] holds three independent lists (Add, Update, Remove) of
//! [`PersonRow`]s with identical shape. Groups that carry a
//! [`RightsSchema`] give every row a [`CapabilityRights`] map.

use crate::error::RowError;
use crate::ids::IdSource;
use crate::rights::{CapabilityRights, RightsSchema};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Row identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
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

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which list of a group a row lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Persons to add
    Add,
    /// Persons whose details change
    Update,
    /// Persons to remove
    Remove,
}

impl ChangeKind {
    /// All lists in display order
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Add, ChangeKind::Update, ChangeKind::Remove];

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Remove => "remove",
        }
    }

    /// Heading shown above the list
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Update => "Update",
            Self::Remove => "Remove",
        }
    }
}

/// Editable contact field of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowField {
    /// Last name
    Name,
    /// First name
    FirstName,
    /// E-mail address
    Email,
    /// Phone number
    Phone,
}

/// One contact entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRow {
    /// Row identity
    pub id: RowId,
    /// Last name
    pub name: String,
    /// First name
    pub first_name: String,
    /// E-mail address (unchecked at this layer)
    pub email: String,
    /// Phone number (unchecked at this layer)
    pub phone: String,
    /// Capability rights, present on rights-bearing groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights: Option<CapabilityRights>,
}

impl PersonRow {
    /// Blank row; all flags false when a schema is given
    #[must_use]
    pub fn blank(id: RowId, schema: Option<&RightsSchema>) -> Self {
        Self {
            id,
            name: String::new(),
            first_name: String::new(),
            email: String::new(),
            phone: String::new(),
            rights: schema.map(RightsSchema::blank),
        }
    }

    /// Current value of a contact field
    #[must_use]
    pub fn field(&self, field: RowField) -> &str {
        match field {
            RowField::Name => &self.name,
            RowField::FirstName => &self.first_name,
            RowField::Email => &self.email,
            RowField::Phone => &self.phone,
        }
    }

    fn field_mut(&mut self, field: RowField) -> &mut String {
        match field {
            RowField::Name => &mut self.name,
            RowField::FirstName => &mut self.first_name,
            RowField::Email => &mut self.email,
            RowField::Phone => &mut self.phone,
        }
    }
}

/// Add/Update/Remove lists sharing one row shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowGroup {
    name: String,
    #[serde(skip)]
    schema: Option<RightsSchema>,
    add: Vec<PersonRow>,
    update: Vec<PersonRow>,
    remove: Vec<PersonRow>,
}

impl RowGroup {
    /// Group of plain contact rows
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    /// Group of rights-bearing rows
    #[must_use]
    pub fn with_rights(name: impl Into<String>, schema: RightsSchema) -> Self {
        Self::build(name.into(), Some(schema))
    }

    fn build(name: String, schema: Option<RightsSchema>) -> Self {
        Self {
            name,
            schema,
            add: Vec::new(),
            update: Vec::new(),
            remove: Vec::new(),
        }
    }

    /// Group name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rights schema, if rows carry rights
    #[inline]
    #[must_use]
    pub fn schema(&self) -> Option<&RightsSchema> {
        self.schema.as_ref()
    }

    /// Id namespace of one list, e.g. `add-lynx`
    #[must_use]
    pub fn namespace(&self, kind: ChangeKind) -> String {
        format!("{}-{}", kind.as_str(), self.name)
    }

    /// Rows of one list
    #[must_use]
    pub fn rows(&self, kind: ChangeKind) -> &[PersonRow] {
        match kind {
            ChangeKind::Add => &self.add,
            ChangeKind::Update => &self.update,
            ChangeKind::Remove => &self.remove,
        }
    }

    fn rows_mut(&mut self, kind: ChangeKind) -> &mut Vec<PersonRow> {
        match kind {
            ChangeKind::Add => &mut self.add,
            ChangeKind::Update => &mut self.update,
            ChangeKind::Remove => &mut self.remove,
        }
    }

    /// Total rows across all lists
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.add.len() + self.update.len() + self.remove.len()
    }

    /// Row by id within one list
    #[must_use]
    pub fn row(&self, kind: ChangeKind, id: &RowId) -> Option<&PersonRow> {
        self.rows(kind).iter().find(|r| &r.id == id)
    }

    fn row_mut(&mut self, kind: ChangeKind, id: &RowId) -> Result<&mut PersonRow, RowError> {
        self.rows_mut(kind)
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| RowError::RowNotFound(id.clone()))
    }

    /// Append a blank row and return its id
    pub fn add_row(&mut self, kind: ChangeKind, ids: &dyn IdSource) -> RowId {
        let id = RowId::new(ids.next_id(&self.namespace(kind)));
        let row = PersonRow::blank(id.clone(), self.schema.as_ref());
        self.rows_mut(kind).push(row);
        tracing::debug!(group = %self.name, list = kind.as_str(), row = %id, "added row");
        id
    }

    /// Overwrite one contact field
    ///
    /// # Errors
    /// `RowError::RowNotFound` if `id` is not in the list
    pub fn set_field(
        &mut self,
        kind: ChangeKind,
        id: &RowId,
        field: RowField,
        value: impl Into<String>,
    ) -> Result<(), RowError> {
        *self.row_mut(kind, id)?.field_mut(field) = value.into();
        Ok(())
    }

    /// Set or clear a capability flag under the exclusion rule
    ///
    /// # Errors
    /// - `RowError::NoRightsSchema` on a plain group
    /// - `RowError::RowNotFound` if `id` is not in the list
    /// - `RowError::UnknownFlag` if `flag` is not in the schema
    pub fn set_right(
        &mut self,
        kind: ChangeKind,
        id: &RowId,
        flag: &str,
        checked: bool,
    ) -> Result<(), RowError> {
        let schema = self
            .schema
            .ok_or_else(|| RowError::NoRightsSchema(self.name.clone()))?;
        let row = self.row_mut(kind, id)?;
        row.rights
            .get_or_insert_with(|| schema.blank())
            .set(&schema, flag, checked)
    }

    /// Remove a row; returns it if it was present
    pub fn remove_row(&mut self, kind: ChangeKind, id: &RowId) -> Option<PersonRow> {
        let rows = self.rows_mut(kind);
        let index = rows.iter().position(|r| &r.id == id)?;
        let row = rows.remove(index);
        tracing::debug!(group = %self.name, list = kind.as_str(), row = %id, "removed row");
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdSource;
    use crate::rights::{API_RIGHTS, LYNX_RIGHTS};

    #[test]
    fn add_row_is_blank_with_namespaced_id() {
        let ids = SequentialIdSource::default();
        let mut group = RowGroup::with_rights("lynx", LYNX_RIGHTS);

        let id = group.add_row(ChangeKind::Add, &ids);
        assert_eq!(id.as_str(), "add-lynx-1");

        let row = group.row(ChangeKind::Add, &id).unwrap();
        assert!(row.name.is_empty() && row.email.is_empty());
        assert_eq!(row.rights.as_ref().unwrap().granted().count(), 0);
    }

    #[test]
    fn plain_rows_have_no_rights() {
        let ids = SequentialIdSource::default();
        let mut group = RowGroup::plain("wallet");
        let id = group.add_row(ChangeKind::Update, &ids);

        assert!(group.row(ChangeKind::Update, &id).unwrap().rights.is_none());
        assert_eq!(
            group.set_right(ChangeKind::Update, &id, "viewOnly", true),
            Err(RowError::NoRightsSchema("wallet".to_string()))
        );
    }

    #[test]
    fn set_field_overwrites_raw_value() {
        let ids = SequentialIdSource::default();
        let mut group = RowGroup::plain("wallet");
        let id = group.add_row(ChangeKind::Add, &ids);

        group
            .set_field(ChangeKind::Add, &id, RowField::Email, "not-an-email")
            .unwrap();
        group
            .set_field(ChangeKind::Add, &id, RowField::FirstName, " Anna ")
            .unwrap();

        let row = group.row(ChangeKind::Add, &id).unwrap();
        assert_eq!(row.field(RowField::Email), "not-an-email");
        assert_eq!(row.field(RowField::FirstName), " Anna ");
    }

    #[test]
    fn lists_are_independent() {
        let ids = SequentialIdSource::default();
        let mut group = RowGroup::with_rights("api", API_RIGHTS);
        let id = group.add_row(ChangeKind::Add, &ids);

        assert!(matches!(
            group.set_field(ChangeKind::Remove, &id, RowField::Name, "x"),
            Err(RowError::RowNotFound(_))
        ));
        assert!(group.remove_row(ChangeKind::Update, &id).is_none());
        assert_eq!(group.rows(ChangeKind::Add).len(), 1);
    }

    #[test]
    fn set_right_applies_exclusion() {
        let ids = SequentialIdSource::default();
        let mut group = RowGroup::with_rights("api", API_RIGHTS);
        let id = group.add_row(ChangeKind::Add, &ids);

        group.set_right(ChangeKind::Add, &id, "tradingRest", true).unwrap();
        group.set_right(ChangeKind::Add, &id, "viewOnly", true).unwrap();

        let rights = group.row(ChangeKind::Add, &id).unwrap().rights.clone().unwrap();
        assert_eq!(rights.granted().collect::<Vec<_>>(), vec!["viewOnly"]);
    }

    #[test]
    fn remove_row_is_irreversible() {
        let ids = SequentialIdSource::default();
        let mut group = RowGroup::plain("wallet");
        let a = group.add_row(ChangeKind::Add, &ids);
        let b = group.add_row(ChangeKind::Add, &ids);

        let removed = group.remove_row(ChangeKind::Add, &a).unwrap();
        assert_eq!(removed.id, a);
        assert!(group.remove_row(ChangeKind::Add, &a).is_none());
        assert_eq!(group.rows(ChangeKind::Add)[0].id, b);
        assert_eq!(group.total_rows(), 1);
    }
}
