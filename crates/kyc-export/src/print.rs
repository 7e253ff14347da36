//! Platform print dialog seam

use crate::error::ExportError;

/// Opens the platform print dialog for the current document
#[cfg_attr(test, mockall::automock)]
pub trait PrintSurface: Send + Sync {
    /// Print the document as currently rendered
    ///
    /// # Errors
    /// `ExportError::Print` if the dialog could not be opened
    fn print(&self) -> Result<(), ExportError>;
}
