//! Office Open XML (OOXML) spreadsheet package parts.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): relationships, content types and constants
//! 2. **Errors** (`error`): the error type shared by every renderer
//! 3. **SpreadsheetML** (`xlsx`): descriptors, registries and part templates
pub mod error;
pub mod opc;
pub mod xlsx;

// Re-export error types
pub use error::{ExportError, Result};
