//! Autocomplete input state
//!
//! Tracks what the user typed and which value was last committed to the
//! suggestion history. Selecting an option always commits; leaving the field
//! commits only a non-empty value that differs from the last commit.

/// Transforms typed text before it is stored, e.g. [`digits_only`]
pub type InputFilter = fn(&str) -> String;

/// Keep ASCII digits only
#[must_use]
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// One autocomplete-backed text field
#[derive(Debug, Clone, Default)]
pub struct AutocompleteField {
    name: String,
    value: String,
    last_committed: String,
    filter: Option<InputFilter>,
}

impl AutocompleteField {
    /// Field with an empty value
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Apply `filter` to everything typed
    #[must_use]
    pub fn with_filter(mut self, filter: InputFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Field (history) name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value with typed text
    pub fn input(&mut self, text: &str) {
        self.value = match self.filter {
            Some(filter) => filter(text),
            None => text.to_string(),
        };
    }

    /// Options containing the current value, case-insensitively
    ///
    /// An empty value matches every option.
    #[must_use]
    pub fn matching<'a>(&self, options: &'a [String]) -> Vec<&'a String> {
        let needle = self.value.to_lowercase();
        options
            .iter()
            .filter(|o| needle.is_empty() || o.to_lowercase().contains(&needle))
            .collect()
    }

    /// Pick an option; returns the value to commit
    pub fn select(&mut self, option: &str) -> Option<String> {
        self.value = option.to_string();
        self.last_committed.clone_from(&self.value);
        Some(self.value.clone())
    }

    /// Leave the field; returns the value to commit, if any
    pub fn blur(&mut self) -> Option<String> {
        let commit = (!self.value.is_empty() && self.value != self.last_committed)
            .then(|| self.value.clone());
        self.last_committed.clone_from(&self.value);
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_commits_changed_value_once() {
        let mut field = AutocompleteField::new("city");
        field.input("Zug");
        assert_eq!(field.blur().as_deref(), Some("Zug"));
        assert_eq!(field.blur(), None);

        field.input("Zurich");
        assert_eq!(field.blur().as_deref(), Some("Zurich"));
    }

    #[test]
    fn blur_skips_empty() {
        let mut field = AutocompleteField::new("city");
        field.input("Zug");
        field.blur();
        field.input("");
        assert_eq!(field.blur(), None);
        // Retyping the earlier value counts as a change again
        field.input("Zug");
        assert_eq!(field.blur().as_deref(), Some("Zug"));
    }

    #[test]
    fn select_commits_and_suppresses_blur() {
        let mut field = AutocompleteField::new("country");
        assert_eq!(field.select("Switzerland").as_deref(), Some("Switzerland"));
        assert_eq!(field.value(), "Switzerland");
        assert_eq!(field.blur(), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let options = vec!["Zurich".to_string(), "Zug".to_string(), "Basel".to_string()];
        let mut field = AutocompleteField::new("city");
        assert_eq!(field.matching(&options).len(), 3);
        field.input("zu");
        assert_eq!(field.matching(&options), vec!["Zurich", "Zug"]);
    }

    #[test]
    fn filter_applies_to_input() {
        let mut field = AutocompleteField::new("zipCode").with_filter(digits_only);
        field.input("80a01");
        assert_eq!(field.value(), "8001");
    }
}
