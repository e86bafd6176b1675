//! XLSX part factory.
//!
//! The [`ExportSession`] collects shared strings, sheet names, styles and
//! images while worksheets are added, and renders every other part of the
//! package from them afterwards. Each part has its own template module that
//! builds an [`XmlElement`](crate::common::xml::XmlElement) tree.

pub mod drawing;
pub mod images;
pub mod options;
pub mod package;
pub mod properties;
pub mod session;
pub mod sheet;
pub mod sheet_names;
pub mod strings;
pub mod styles;
pub mod theme;
pub mod workbook;

// Re-export main types
pub use images::{ImageRegistry, SheetImages, WorkbookImage};
pub use options::{ExportOptions, FactoryMode};
pub use package::{PackagePart, PartContent};
pub use properties::CoreProperties;
pub use session::{ExportSession, RenderedSheet, SessionState};
pub use sheet::WorksheetPart;
pub use sheet_names::SheetNameRegistry;
pub use strings::SharedStringTable;
pub use styles::StyleRegistry;
pub use theme::OfficeTheme;
