//! Cell style descriptors supplied by the grid export layer.
//!
//! An [`ExcelStyle`] is referenced by its `id` from worksheet cells. Colors may be
//! given as `#RRGGBB`, `RRGGBB` or `AARRGGBB`; they are normalized to the ARGB
//! form SpreadsheetML expects when the stylesheet is rendered.

use serde::{Deserialize, Serialize};

/// A named cell style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelStyle {
    /// Identifier referenced by [`super::worksheet::ExcelCell::style_id`]
    pub id: String,
    pub font: Option<ExcelFont>,
    pub interior: Option<ExcelInterior>,
    pub borders: Option<ExcelBorders>,
    pub alignment: Option<ExcelAlignment>,
    pub number_format: Option<ExcelNumberFormat>,
    pub protection: Option<ExcelProtection>,
}

/// Font properties for a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelFont {
    pub font_name: Option<String>,
    /// Size in points; the stylesheet default applies when absent
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_through: bool,
    pub color: Option<String>,
}

/// Fill properties for a style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelInterior {
    pub color: Option<String>,
    pub pattern: FillPattern,
    pub pattern_color: Option<String>,
}

/// Fill pattern types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillPattern {
    None,
    #[default]
    Solid,
    Gray125,
    DarkGray,
    MediumGray,
    LightGray,
    Gray0625,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
}

impl FillPattern {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::Gray125 => "gray125",
            Self::DarkGray => "darkGray",
            Self::MediumGray => "mediumGray",
            Self::LightGray => "lightGray",
            Self::Gray0625 => "gray0625",
            Self::DarkHorizontal => "darkHorizontal",
            Self::DarkVertical => "darkVertical",
            Self::DarkDown => "darkDown",
            Self::DarkUp => "darkUp",
            Self::DarkGrid => "darkGrid",
            Self::DarkTrellis => "darkTrellis",
        }
    }
}

/// Border properties for a style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelBorders {
    pub border_left: Option<ExcelBorder>,
    pub border_right: Option<ExcelBorder>,
    pub border_top: Option<ExcelBorder>,
    pub border_bottom: Option<ExcelBorder>,
}

/// A single border side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelBorder {
    pub line_style: BorderLineStyle,
    pub color: Option<String>,
}

/// Border line styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderLineStyle {
    None,
    #[default]
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl BorderLineStyle {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Thin => "thin",
            Self::Medium => "medium",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Thick => "thick",
            Self::Double => "double",
            Self::Hair => "hair",
            Self::MediumDashed => "mediumDashed",
            Self::DashDot => "dashDot",
            Self::MediumDashDot => "mediumDashDot",
            Self::DashDotDot => "dashDotDot",
            Self::MediumDashDotDot => "mediumDashDotDot",
            Self::SlantDashDot => "slantDashDot",
        }
    }
}

/// Alignment properties for a style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelAlignment {
    /// SpreadsheetML horizontal alignment (`left`, `center`, `right`, ...)
    pub horizontal: Option<String>,
    /// SpreadsheetML vertical alignment (`top`, `center`, `bottom`, ...)
    pub vertical: Option<String>,
    pub wrap_text: bool,
    pub shrink_to_fit: bool,
    pub indent: Option<u32>,
    /// Text rotation in degrees (0-180, or 255 for vertical text)
    pub rotate: Option<u32>,
}

/// Number format for a style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelNumberFormat {
    pub format: String,
}

/// Cell protection for a style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelProtection {
    pub protected: bool,
    pub hide_formula: bool,
}

/// Normalize a color to the `AARRGGBB` form.
///
/// `#RRGGBB` and `RRGGBB` gain an opaque alpha channel; anything that is not
/// six or eight hex digits is passed through unchanged.
pub fn to_argb(color: &str) -> String {
    let hex = color.trim().trim_start_matches('#');
    let is_hex = hex.bytes().all(|b| b.is_ascii_hexdigit());
    match hex.len() {
        6 if is_hex => format!("FF{}", hex.to_ascii_uppercase()),
        8 if is_hex => hex.to_ascii_uppercase(),
        _ => color.to_string(),
    }
}
