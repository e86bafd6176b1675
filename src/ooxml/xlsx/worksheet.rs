//! Worksheet descriptors supplied by the grid export layer.

use serde::{Deserialize, Serialize};

/// One worksheet of an export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelWorksheet {
    /// Requested sheet name; the session may suffix it to keep names unique
    pub name: String,
    pub table: ExcelTable,
}

/// Column and row data of a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelTable {
    pub columns: Vec<ExcelColumn>,
    pub rows: Vec<ExcelRow>,
}

/// Column properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelColumn {
    /// Width in pixels
    pub width: Option<f64>,
    pub hidden: bool,
}

/// A row of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelRow {
    /// 1-based row number; defaults to the row's position in the table
    pub index: Option<u32>,
    /// Height in pixels
    pub height: Option<f64>,
    pub hidden: bool,
    pub cells: Vec<ExcelCell>,
}

/// A single cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelCell {
    pub style_id: Option<String>,
    pub data: Option<ExcelData>,
    /// Number of additional columns this cell spans to the right
    pub merge_across: Option<u32>,
}

impl ExcelCell {
    /// Cell holding `value` of the given type.
    pub fn new(data_type: ExcelDataType, value: impl Into<String>) -> Self {
        Self {
            data: Some(ExcelData {
                data_type,
                value: Some(value.into()),
            }),
            ..Default::default()
        }
    }

    /// Shorthand for a string cell.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExcelDataType::String, value)
    }

    /// Shorthand for a numeric cell.
    pub fn number(value: impl ToString) -> Self {
        Self::new(ExcelDataType::Number, value.to_string())
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn with_merge_across(mut self, columns: u32) -> Self {
        self.merge_across = Some(columns);
        self
    }
}

/// Cell payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelData {
    #[serde(rename = "type")]
    pub data_type: ExcelDataType,
    pub value: Option<String>,
}

/// Types of data a cell can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExcelDataType {
    #[default]
    String,
    Number,
    Boolean,
    /// Serial date number, written as a plain number
    DateTime,
    Error,
    /// Formula text, with or without a leading `=`
    Formula,
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for SheetMargin {
    fn default() -> Self {
        Self {
            top: 0.75,
            right: 0.7,
            bottom: 0.75,
            left: 0.7,
            header: 0.3,
            footer: 0.3,
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// Page setup configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub orientation: Orientation,
    /// SpreadsheetML paper size code (e.g., 1 = Letter, 9 = A4)
    pub paper_size: Option<u32>,
}

/// Left, center and right sections of a header or footer line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderFooterSections {
    pub left: Option<String>,
    pub center: Option<String>,
    pub right: Option<String>,
}

impl HeaderFooterSections {
    /// Encode the sections with the `&L`, `&C`, `&R` control codes.
    ///
    /// Section text is taken verbatim, so it may carry codes such as `&P` (page
    /// number). Returns `None` when every section is empty.
    pub fn to_code(&self) -> Option<String> {
        let mut code = String::new();
        for (tag, section) in [("&L", &self.left), ("&C", &self.center), ("&R", &self.right)] {
            if let Some(text) = section.as_deref().filter(|t| !t.is_empty()) {
                code.push_str(tag);
                code.push_str(text);
            }
        }
        (!code.is_empty()).then_some(code)
    }
}

/// Header and footer for one page class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderFooter {
    pub header: HeaderFooterSections,
    pub footer: HeaderFooterSections,
}

/// Header and footer configuration.
///
/// `all` applies to every page unless `first` or `even` override it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderFooterConfig {
    pub all: HeaderFooter,
    pub first: Option<HeaderFooter>,
    pub even: Option<HeaderFooter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_footer_code() {
        let sections = HeaderFooterSections {
            left: Some("Report".to_string()),
            center: None,
            right: Some("Page &P of &N".to_string()),
        };
        assert_eq!(sections.to_code().as_deref(), Some("&LReport&RPage &P of &N"));
        assert_eq!(HeaderFooterSections::default().to_code(), None);
    }

    #[test]
    fn test_cell_shorthands() {
        let cell = ExcelCell::number(42).with_style("bold").with_merge_across(2);
        assert_eq!(cell.style_id.as_deref(), Some("bold"));
        assert_eq!(cell.merge_across, Some(2));
        let data = cell.data.unwrap();
        assert_eq!(data.data_type, ExcelDataType::Number);
        assert_eq!(data.value.as_deref(), Some("42"));
    }
}
