//! Error types for XLSX part rendering.

use thiserror::Error;

use crate::ooxml::xlsx::writer::session::SessionState;

/// Result type for XLSX part rendering.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error types for XLSX part rendering.
///
/// Every variant is a caller contract violation; none of them is transient.
#[derive(Error, Debug)]
pub enum ExportError {
    /// An operation was invoked in a session state that does not allow it
    #[error("Invalid call order: {operation} is not allowed while the session is {state}")]
    InvalidCallOrder {
        operation: &'static str,
        state: SessionState,
    },

    /// The rendered worksheets handed over for packaging do not match the registered sheets
    #[error("Expected {expected} rendered worksheets, got {actual}")]
    SheetCountMismatch { expected: usize, actual: usize },

    /// Drawing parts were requested for a sheet without registered images
    #[error("Sheet {0} has no registered images")]
    NoSheetImages(usize),

    /// A placement references an image missing from the workbook image index
    #[error("Image not registered in workbook: {0}")]
    UnknownImage(String),

    /// Image payload could not be decoded
    #[error("Invalid data for image '{id}': {reason}")]
    InvalidImageData { id: String, reason: String },

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(String),
}
