//! Open Packaging Conventions (OPC) building blocks.
//!
//! This module provides the package-level pieces every SpreadsheetML part
//! factory needs:
//!
//! - Content type, namespace and relationship type constants
//! - Relationship collections with sequential `rId` allocation
//! - `[Content_Types].xml` mappings
//!
//! The ZIP container itself is assembled by the caller.

pub mod constants;
pub mod content_types;
pub mod rel;

// Re-export commonly used types
pub use content_types::ContentTypes;
pub use rel::{Relationship, Relationships};
