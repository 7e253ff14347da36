//! Onboarding session
//!
//! Owns the page list, one form instance per active page, the additional
//! persons beneath the primary authorized-person page, and the shared
//! position and suggestion stores.
//!
//! Form instances follow their page: duplicating or restoring a page creates
//! a blank instance, removing a page drops its instance.

use crate::autocomplete::AutocompleteField;
use crate::config::OnboardingConfig;
use crate::error::{OnboardingError, Result};
use crate::settings::{AccentColor, Settings};
use kyc_export::{ExportArtifact, ExportPipeline, RenderedPage};
use kyc_forms::{
    validate_record, AdditionalPersons, ChangeKind, FieldErrors, FormKind, FormPageDescriptor,
    FormRecord, PageId, PageList, PersonField, PersonRecord, PersonValidator, RowField, RowGroup,
    RowId, SharedIdSource, UlidIdSource, Validator, PRIMARY_AUTHORIZED_PAGE,
};
use kyc_storage::{
    FileRepository, MemoryRepository, PositionRegistry, SharedRepository, SuggestionStore,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Which form instance an edit addresses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormTarget {
    /// Form on an active page
    Page(PageId),
    /// Additional person by number
    Person(u32),
}

impl From<PageId> for FormTarget {
    fn from(id: PageId) -> Self {
        Self::Page(id)
    }
}

/// State of one onboarding document
#[derive(Debug)]
pub struct OnboardingSession {
    config: OnboardingConfig,
    ids: SharedIdSource,
    pages: PageList,
    forms: HashMap<PageId, FormRecord>,
    persons: AdditionalPersons,
    person_forms: BTreeMap<u32, PersonRecord>,
    positions: PositionRegistry,
    suggestions: SuggestionStore,
    settings: Settings,
}

impl OnboardingSession {
    /// Create session over an explicit repository and id source
    ///
    /// # Errors
    /// `OnboardingError::Config` if `config` fails validation
    pub fn new(
        config: OnboardingConfig,
        repo: SharedRepository,
        ids: SharedIdSource,
    ) -> Result<Self> {
        config.validate()?;

        let pages = PageList::with_default_pages(Arc::clone(&ids));
        let forms = pages
            .pages()
            .iter()
            .map(|p| (p.id.clone(), FormRecord::blank(p.kind)))
            .collect();

        Ok(Self {
            settings: Settings {
                accent: config.accent_color,
            },
            suggestions: SuggestionStore::with_capacity(
                Arc::clone(&repo),
                config.suggestion_capacity,
            ),
            positions: PositionRegistry::new(repo),
            config,
            ids,
            pages,
            forms,
            persons: AdditionalPersons::new(),
            person_forms: BTreeMap::new(),
        })
    }

    /// Create session from configuration alone
    ///
    /// Uses a file repository under `storage_dir` when set, otherwise memory.
    ///
    /// # Errors
    /// Returns error if the storage directory cannot be created or the
    /// configuration is invalid
    pub fn open(config: OnboardingConfig) -> Result<Self> {
        let repo: SharedRepository = match &config.storage_dir {
            Some(dir) => Arc::new(FileRepository::open(dir)?),
            None => Arc::new(MemoryRepository::new()),
        };
        tracing::info!(storage = ?config.storage_dir, "opening onboarding session");
        Self::new(config, repo, UlidIdSource::shared())
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    // --- Pages ---------------------------------------------------------

    /// Active pages in display order
    #[inline]
    #[must_use]
    pub fn pages(&self) -> &[FormPageDescriptor] {
        self.pages.pages()
    }

    /// Pages in the recoverable bin
    #[inline]
    #[must_use]
    pub fn removed_pages(&self) -> &[FormPageDescriptor] {
        self.pages.removed()
    }

    /// Duplicate a page with a blank form; `None` if `id` is not active
    pub fn duplicate_page(&mut self, id: &PageId) -> Option<FormPageDescriptor> {
        let page = self.pages.duplicate(id)?.clone();
        self.forms.insert(page.id.clone(), FormRecord::blank(page.kind));
        Some(page)
    }

    /// Move a page to the bin, dropping its form
    ///
    /// # Errors
    /// - `PageListError::LastPage` if it is the only page
    /// - `PageListError::NotFound` if `id` is not active
    pub fn remove_page(&mut self, id: &PageId) -> Result<FormPageDescriptor> {
        let page = self.pages.remove(id)?.clone();
        self.forms.remove(&page.id);
        Ok(page)
    }

    /// Bring a page back from the bin with a blank form
    pub fn restore_page(&mut self, id: &PageId) -> Option<FormPageDescriptor> {
        let page = self.pages.restore(id)?.clone();
        self.forms.insert(page.id.clone(), FormRecord::blank(page.kind));
        Some(page)
    }

    /// Forget every binned page; returns how many were dropped
    pub fn clear_bin(&mut self) -> usize {
        self.pages.clear_bin().len()
    }

    // --- Additional persons -------------------------------------------

    /// Person numbers beneath the primary page
    #[inline]
    #[must_use]
    pub fn additional_persons(&self) -> &[u32] {
        self.persons.numbers()
    }

    /// Add a blank additional person; returns its number
    pub fn add_person(&mut self) -> u32 {
        let n = self.persons.add();
        self.person_forms.insert(n, PersonRecord::default());
        n
    }

    /// Remove an additional person and its form
    pub fn remove_person(&mut self, n: u32) -> bool {
        self.person_forms.remove(&n);
        self.persons.remove(n)
    }

    // --- Forms ---------------------------------------------------------

    /// Form of an active page
    #[must_use]
    pub fn form(&self, id: &PageId) -> Option<&FormRecord> {
        self.forms.get(id)
    }

    /// Mutable form of an active page
    pub fn form_mut(&mut self, id: &PageId) -> Option<&mut FormRecord> {
        self.forms.get_mut(id)
    }

    /// Form of an additional person
    #[must_use]
    pub fn person_form(&self, n: u32) -> Option<&PersonRecord> {
        self.person_forms.get(&n)
    }

    /// Set a person field on an authorized-person, person or additional-person form
    ///
    /// # Errors
    /// - `PageNotFound` / `PersonNotFound` for unknown targets
    /// - `WrongForm` if the page holds no person details
    pub fn set_person_field(
        &mut self,
        target: &FormTarget,
        field: PersonField,
        value: impl Into<String>,
    ) -> Result<()> {
        let details = match target {
            FormTarget::Page(id) => {
                let form = self
                    .forms
                    .get_mut(id)
                    .ok_or_else(|| OnboardingError::PageNotFound(id.clone()))?;
                let kind = form.kind();
                form.details_mut().ok_or_else(|| OnboardingError::WrongForm {
                    page: id.clone(),
                    kind,
                })?
            }
            FormTarget::Person(n) => {
                &mut self
                    .person_forms
                    .get_mut(n)
                    .ok_or(OnboardingError::PersonNotFound(*n))?
                    .details
            }
        };
        details.set(field, value);
        Ok(())
    }

    /// Validate one form instance
    ///
    /// # Errors
    /// `PageNotFound` / `PersonNotFound` for unknown targets
    pub fn validate(&self, target: &FormTarget) -> Result<FieldErrors> {
        match target {
            FormTarget::Page(id) => self
                .forms
                .get(id)
                .map(validate_record)
                .ok_or_else(|| OnboardingError::PageNotFound(id.clone())),
            FormTarget::Person(n) => self
                .person_forms
                .get(n)
                .map(|r| PersonValidator.validate(r))
                .ok_or(OnboardingError::PersonNotFound(*n)),
        }
    }

    fn row_group_mut(&mut self, page: &PageId, group: &str) -> Result<&mut RowGroup> {
        let form = self
            .forms
            .get_mut(page)
            .ok_or_else(|| OnboardingError::PageNotFound(page.clone()))?;
        form.row_group_mut(group)
            .ok_or_else(|| OnboardingError::UnknownRowGroup {
                page: page.clone(),
                group: group.to_string(),
            })
    }

    /// Append a blank row to a row group list
    ///
    /// # Errors
    /// `PageNotFound` or `UnknownRowGroup`
    pub fn add_row(&mut self, page: &PageId, group: &str, list: ChangeKind) -> Result<RowId> {
        let ids = Arc::clone(&self.ids);
        Ok(self.row_group_mut(page, group)?.add_row(list, ids.as_ref()))
    }

    /// Overwrite a row contact field
    ///
    /// # Errors
    /// `PageNotFound`, `UnknownRowGroup` or a `RowError`
    pub fn set_row_field(
        &mut self,
        page: &PageId,
        group: &str,
        list: ChangeKind,
        row: &RowId,
        field: RowField,
        value: impl Into<String>,
    ) -> Result<()> {
        Ok(self
            .row_group_mut(page, group)?
            .set_field(list, row, field, value)?)
    }

    /// Set or clear a row capability flag
    ///
    /// # Errors
    /// `PageNotFound`, `UnknownRowGroup` or a `RowError`
    pub fn set_row_right(
        &mut self,
        page: &PageId,
        group: &str,
        list: ChangeKind,
        row: &RowId,
        flag: &str,
        checked: bool,
    ) -> Result<()> {
        Ok(self
            .row_group_mut(page, group)?
            .set_right(list, row, flag, checked)?)
    }

    /// Remove a row; `Ok(false)` if it was not there
    ///
    /// # Errors
    /// `PageNotFound` or `UnknownRowGroup`
    pub fn remove_row(
        &mut self,
        page: &PageId,
        group: &str,
        list: ChangeKind,
        row: &RowId,
    ) -> Result<bool> {
        Ok(self.row_group_mut(page, group)?.remove_row(list, row).is_some())
    }

    // --- Positions and suggestions ------------------------------------

    /// Position registry
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &PositionRegistry {
        &self.positions
    }

    /// Add a custom position; returns the stored (trimmed) value
    ///
    /// # Errors
    /// `OnboardingError::Position` if empty or already listed
    pub fn add_position(&self, position: &str) -> Result<String> {
        Ok(self.positions.add(position)?)
    }

    /// Suggestion store
    #[inline]
    #[must_use]
    pub fn suggestions(&self) -> &SuggestionStore {
        &self.suggestions
    }

    /// Dropdown options for a field: history first, then `builtin`
    #[must_use]
    pub fn options(&self, field: &str, builtin: &[String]) -> Vec<String> {
        self.suggestions.merged_options(field, builtin)
    }

    /// Leave an autocomplete field, committing its value if it changed
    pub fn blur_field(&self, field: &mut AutocompleteField) -> bool {
        field
            .blur()
            .is_some_and(|value| self.suggestions.commit(field.name(), &value))
    }

    /// Pick an autocomplete option, committing it
    pub fn select_option(&self, field: &mut AutocompleteField, option: &str) -> bool {
        field
            .select(option)
            .is_some_and(|value| self.suggestions.commit(field.name(), &value))
    }

    // --- Settings -------------------------------------------------------

    /// Current settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change the accent color
    ///
    /// # Errors
    /// `OnboardingError::UnknownAccent` if `hex` is not in the palette
    pub fn set_accent(&mut self, hex: &str) -> Result<AccentColor> {
        let accent = AccentColor::parse(hex)?;
        self.settings.accent = accent;
        tracing::debug!(accent = %accent.hex(), "changed accent color");
        Ok(accent)
    }

    // --- Export -----------------------------------------------------------

    /// Form instances in document order
    ///
    /// Additional persons follow the primary authorized-person page.
    #[must_use]
    pub fn rendered_pages(&self) -> Vec<RenderedPage> {
        let mut rendered = Vec::with_capacity(self.pages.len() + self.persons.len());
        for page in self.pages.pages() {
            rendered.push(RenderedPage {
                index: rendered.len(),
                page_id: page.id.clone(),
                kind: page.kind,
                label: page.label.clone(),
                person_number: page.person_number,
            });
            if page.id.as_str() == PRIMARY_AUTHORIZED_PAGE {
                for &n in self.persons.numbers() {
                    rendered.push(RenderedPage {
                        index: rendered.len(),
                        page_id: PageId::new(format!("{PRIMARY_AUTHORIZED_PAGE}/person-{n}")),
                        kind: FormKind::Person,
                        label: format!("Person {n}"),
                        person_number: Some(n),
                    });
                }
            }
        }
        rendered
    }

    /// Capture every rendered page into one document
    ///
    /// # Errors
    /// `OnboardingError::Export` if nothing could be captured
    pub async fn download(&self, pipeline: &ExportPipeline) -> Result<ExportArtifact> {
        let pages = self.rendered_pages();
        tracing::info!(pages = pages.len(), "exporting onboarding document");
        Ok(pipeline.download(&pages).await?)
    }

    /// Print the rendered document
    ///
    /// # Errors
    /// `OnboardingError::Export` if the print surface fails
    pub async fn print(&self, pipeline: &ExportPipeline) -> Result<()> {
        Ok(pipeline.print().await?)
    }
}
