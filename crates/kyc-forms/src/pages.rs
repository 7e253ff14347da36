//! Page list manager
//!
//! Ordered active pages plus a recoverable bin of removed pages.
//!
//! # Invariants
//! - The active list is never empty
//! - Duplicates are inserted directly after their source
//! - Restored pages are appended at the end

use crate::error::PageListError;
use crate::ids::SharedIdSource;
use crate::page::{FormKind, FormPageDescriptor, PageId};

/// Id of the authorized-person page that hosts the additional persons
pub const PRIMARY_AUTHORIZED_PAGE: &str = "auth-1";

/// Starter pages of a new session
#[must_use]
pub fn default_pages() -> Vec<FormPageDescriptor> {
    vec![
        FormPageDescriptor::new(
            PRIMARY_AUTHORIZED_PAGE,
            FormKind::AuthorizedPerson,
            "Authorized Person 1",
        )
        .with_person_number(1),
        FormPageDescriptor::new("wallet-1", FormKind::WalletBank, "Wallet & Bank Account"),
        FormPageDescriptor::new("lynx-1", FormKind::LynxApi, "Lynx & API"),
        FormPageDescriptor::new("scope-1", FormKind::ScopeAuthority, "Scope of Authority"),
    ]
}

/// Active pages and the recoverable bin
#[derive(Debug, Clone)]
pub struct PageList {
    active: Vec<FormPageDescriptor>,
    removed: Vec<FormPageDescriptor>,
    ids: SharedIdSource,
}

impl PageList {
    /// Create list from initial pages
    ///
    /// # Errors
    /// `PageListError::Empty` if `pages` is empty
    pub fn new(pages: Vec<FormPageDescriptor>, ids: SharedIdSource) -> Result<Self, PageListError> {
        if pages.is_empty() {
            return Err(PageListError::Empty);
        }
        Ok(Self {
            active: pages,
            removed: Vec::new(),
            ids,
        })
    }

    /// Create list with the starter pages
    #[must_use]
    pub fn with_default_pages(ids: SharedIdSource) -> Self {
        Self {
            active: default_pages(),
            removed: Vec::new(),
            ids,
        }
    }

    /// Active pages in display order
    #[inline]
    #[must_use]
    pub fn pages(&self) -> &[FormPageDescriptor] {
        &self.active
    }

    /// Pages in the recoverable bin, oldest removal first
    #[inline]
    #[must_use]
    pub fn removed(&self) -> &[FormPageDescriptor] {
        &self.removed
    }

    /// Number of active pages
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if there are no active pages
    ///
    /// `remove` refuses to drop the last page, so a list built by `new`
    /// or `with_default_pages` never reports empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active page by id
    #[must_use]
    pub fn get(&self, id: &PageId) -> Option<&FormPageDescriptor> {
        self.active.iter().find(|p| &p.id == id)
    }

    /// Position of an active page
    #[must_use]
    pub fn position(&self, id: &PageId) -> Option<usize> {
        self.active.iter().position(|p| &p.id == id)
    }

    /// Number of active pages of one kind
    #[must_use]
    pub fn count_of(&self, kind: FormKind) -> usize {
        self.active.iter().filter(|p| p.kind == kind).count()
    }

    /// Duplicate a page, inserting the copy right after it
    ///
    /// Person-like pages are numbered `count(kind) + 1`; other pages get a
    /// `" (Copy)"` suffix. Returns the new page, or `None` if `id` is not
    /// active.
    pub fn duplicate(&mut self, id: &PageId) -> Option<&FormPageDescriptor> {
        let index = self.position(id)?;
        let source = &self.active[index];
        let kind = source.kind;

        let number = self.count_of(kind) + 1;
        let page = match kind.numbered_label(number) {
            Some(label) => FormPageDescriptor::new(self.fresh_id(kind), kind, label)
                .with_person_number(u32::try_from(number).unwrap_or(u32::MAX)),
            None => {
                let label = format!("{} (Copy)", source.label);
                FormPageDescriptor::new(self.fresh_id(kind), kind, label)
            }
        };

        tracing::debug!(source = %id, page = %page.id, label = %page.label, "duplicated page");
        self.active.insert(index + 1, page);
        self.active.get(index + 1)
    }

    /// Draw an id not used by any active or binned page
    fn fresh_id(&self, kind: FormKind) -> PageId {
        loop {
            let id = PageId::new(self.ids.next_id(kind.slug()));
            if !self.contains_id(&id) {
                return id;
            }
            tracing::debug!(page = %id, "generated page id already in use, drawing again");
        }
    }

    fn contains_id(&self, id: &PageId) -> bool {
        self.active.iter().chain(&self.removed).any(|p| &p.id == id)
    }

    /// Move a page to the recoverable bin
    ///
    /// # Errors
    /// - `PageListError::LastPage` if only one page remains (nothing changes)
    /// - `PageListError::NotFound` if `id` is not active
    pub fn remove(&mut self, id: &PageId) -> Result<&FormPageDescriptor, PageListError> {
        if self.active.len() <= 1 {
            tracing::warn!(page = %id, "refusing to remove the last form page");
            return Err(PageListError::LastPage);
        }
        let index = self
            .position(id)
            .ok_or_else(|| PageListError::NotFound(id.clone()))?;

        let page = self.active.remove(index);
        tracing::debug!(page = %page.id, "moved page to bin");
        self.removed.push(page);
        Ok(&self.removed[self.removed.len() - 1])
    }

    /// Move a page from the bin to the end of the active list
    ///
    /// Returns the restored page, or `None` if `id` is not in the bin.
    pub fn restore(&mut self, id: &PageId) -> Option<&FormPageDescriptor> {
        let index = self.removed.iter().position(|p| &p.id == id)?;
        let page = self.removed.remove(index);
        tracing::debug!(page = %page.id, "restored page");
        self.active.push(page);
        self.active.last()
    }

    /// Permanently forget every page in the bin
    pub fn clear_bin(&mut self) -> Vec<FormPageDescriptor> {
        std::mem::take(&mut self.removed)
    }
}
