//! Transient style overrides
//!
//! Export temporarily injects a stylesheet into the rendering surface. The
//! [`StyleGuard`] removes it again when dropped, so every exit path of an
//! export (success, error or panic) leaves the surface unchanged.

/// A named stylesheet injected for the duration of one export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOverride {
    /// Element id used to remove the override
    pub id: &'static str,
    /// Stylesheet text
    pub css: &'static str,
}

/// Hides input chrome on the printed page
pub const PRINT_OVERRIDE: StyleOverride = StyleOverride {
    id: "print-override-styles",
    css: "@media print {
  input, select, textarea {
    border: none !important;
    background: none !important;
    padding: 0 !important;
  }
}
",
};

/// Forces plain RGB colors and opaque backgrounds during capture
pub const CAPTURE_OVERRIDE: StyleOverride = StyleOverride {
    id: "pdf-capture-override",
    css: ".form-page,
.form-page * {
  color: rgb(0, 0, 0) !important;
  background-color: rgb(255, 255, 255) !important;
  border-color: rgb(209, 213, 219) !important;
}
.form-page .bg-blue-600 { background-color: rgb(37, 99, 235) !important; }
.form-page .bg-blue-50 { background-color: rgb(239, 246, 255) !important; }
.form-page .bg-gray-50 { background-color: rgb(249, 250, 251) !important; }
.form-page .text-gray-900 { color: rgb(17, 24, 39) !important; }
.form-page .text-gray-700 { color: rgb(55, 65, 81) !important; }
.form-page .text-blue-600 { color: rgb(37, 99, 235) !important; }
.form-page .border-gray-300 { border-color: rgb(209, 213, 219) !important; }
.form-page input,
.form-page select,
.form-page textarea {
  background-color: rgb(255, 255, 255) !important;
  color: rgb(0, 0, 0) !important;
  border-color: rgb(209, 213, 219) !important;
}
",
};

/// Surface that accepts global stylesheets
#[cfg_attr(test, mockall::automock)]
pub trait StyleHost: Send + Sync {
    /// Add (or replace) the stylesheet with `id`
    fn inject(&self, id: &str, css: &str);

    /// Remove the stylesheet with `id`; returns `true` if it was present
    fn remove(&self, id: &str) -> bool;
}

/// Removes an injected override on drop
#[must_use = "the override is removed as soon as the guard is dropped"]
pub struct StyleGuard<'a> {
    host: &'a dyn StyleHost,
    id: &'static str,
}

impl<'a> StyleGuard<'a> {
    /// Inject `style` into `host`
    pub fn apply(host: &'a dyn StyleHost, style: &StyleOverride) -> Self {
        host.inject(style.id, style.css);
        tracing::debug!(style = style.id, "injected style override");
        Self { host, id: style.id }
    }

    /// Id of the guarded override
    #[inline]
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }
}

impl Drop for StyleGuard<'_> {
    fn drop(&mut self) {
        if self.host.remove(self.id) {
            tracing::debug!(style = self.id, "removed style override");
        } else {
            tracing::warn!(style = self.id, "style override was already gone");
        }
    }
}
