//! xlsx-factory - assembles the XML parts of an Excel (.xlsx) package
//!
//! This library turns in-memory grid data (worksheets, cell styles and
//! images) into the parts of an Office Open XML spreadsheet package and keeps
//! the references between those parts consistent.
//!
//! # Features
//!
//! - **Shared strings**: text cells are interned once per export
//! - **Unique sheet names**: duplicates are suffixed with `_1`, `_2`, ...
//! - **Images**: media files, drawings and their relationships are numbered
//!   across the whole workbook
//! - **Streaming worksheets**: each sheet is rendered as soon as it is added
//! - **Explicit sessions**: no global state, one [`ExportSession`] per export
//!
//! Writing the ZIP container is left to the caller: [`ExportSession::package_parts`]
//! returns every part with its path inside the archive.
//!
//! # Example - Exporting one sheet
//!
//! ```
//! use xlsx_factory::{
//!     ExcelCell, ExcelFont, ExcelRow, ExcelStyle, ExcelTable, ExcelWorksheet, ExportOptions,
//!     ExportSession, PartContent,
//! };
//!
//! # fn main() -> Result<(), xlsx_factory::ExportError> {
//! let mut session = ExportSession::with_options(ExportOptions::new().with_author("Finance"));
//! session.start_export();
//!
//! let styles = vec![ExcelStyle {
//!     id: "header".to_string(),
//!     font: Some(ExcelFont { bold: true, ..Default::default() }),
//!     ..Default::default()
//! }];
//! let worksheet = ExcelWorksheet {
//!     name: "Q1".to_string(),
//!     table: ExcelTable {
//!         rows: vec![
//!             ExcelRow {
//!                 cells: vec![ExcelCell::string("Region").with_style("header")],
//!                 ..Default::default()
//!             },
//!             ExcelRow {
//!                 cells: vec![ExcelCell::number(1250.5)],
//!                 ..Default::default()
//!             },
//!         ],
//!         ..Default::default()
//!     },
//! };
//!
//! let sheet = session.create_excel(&styles, &worksheet, None, None, None)?;
//! for part in session.package_parts(vec![sheet.xml])? {
//!     if let PartContent::Xml(ref xml) = part.content {
//!         assert!(xml.starts_with("<?xml"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Unit conversion and XML element trees shared by the part templates
pub mod common;

/// OOXML package parts
///
/// This module provides the OPC building blocks and the SpreadsheetML part
/// factory.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::error::{ExportError, Result};
pub use ooxml::xlsx::*;
