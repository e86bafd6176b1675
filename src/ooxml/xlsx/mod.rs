//! Excel (.xlsx) spreadsheet parts.
//!
//! - [`format`], [`worksheet`], [`image`]: descriptors supplied by the grid
//!   export layer
//! - [`cell`]: A1 reference helpers
//! - [`writer`]: the export session and the part templates

pub mod cell;
pub mod format;
pub mod image;
pub mod worksheet;
pub mod writer;

pub use format::{
    BorderLineStyle, ExcelAlignment, ExcelBorder, ExcelBorders, ExcelFont, ExcelInterior,
    ExcelNumberFormat, ExcelProtection, ExcelStyle, FillPattern,
};
pub use image::{ExcelImage, ImagePosition, ImageType, PlacedImage};
pub use worksheet::{
    ExcelCell, ExcelColumn, ExcelData, ExcelDataType, ExcelRow, ExcelTable, ExcelWorksheet,
    HeaderFooter, HeaderFooterConfig, HeaderFooterSections, Orientation, PageSetup, SheetMargin,
};
pub use writer::{
    ExportOptions, ExportSession, FactoryMode, PackagePart, PartContent, RenderedSheet,
    SessionState,
};
