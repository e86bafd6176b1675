//! Image descriptors and the resolved placement records derived from them.

use crate::ooxml::opc::constants::content_type as ct;
use serde::{Deserialize, Serialize};

/// Supported image formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[default]
    Png,
    Jpg,
    Gif,
}

impl ImageType {
    /// File extension used for the packaged media file.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Gif => "gif",
        }
    }

    /// MIME type registered in `[Content_Types].xml`.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => ct::PNG,
            Self::Jpg => ct::JPEG,
            Self::Gif => ct::GIF,
        }
    }
}

/// Where an image sits on its sheet. Rows and columns are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePosition {
    pub row: Option<u32>,
    pub column: Option<u32>,
    pub row_span: Option<u32>,
    pub col_span: Option<u32>,
    /// Horizontal offset from the anchor cell, in pixels
    pub offset_x: Option<u32>,
    /// Vertical offset from the anchor cell, in pixels
    pub offset_y: Option<u32>,
}

/// An image supplied by the grid export layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelImage {
    /// Identifier shared by every placement of the same picture
    pub id: String,
    /// Image bytes as base64, optionally as a `data:` URL
    pub base64: String,
    pub image_type: ImageType,
    pub alt_text: Option<String>,
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
    pub position: Option<ImagePosition>,
}

impl ExcelImage {
    /// Whether the caller fixed neither the row nor the column of this image.
    pub fn lacks_placement(&self) -> bool {
        self.position
            .is_none_or(|pos| pos.row.is_none() && pos.column.is_none())
    }
}

/// Immutable placement record produced when an image is registered on a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedImage {
    pub id: String,
    pub image_type: ImageType,
    /// 1-based anchor row
    pub row: u32,
    /// 1-based anchor column
    pub column: u32,
    pub row_span: u32,
    pub col_span: u32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt_text: Option<String>,
}

impl PlacedImage {
    /// Resolve the placement of `image`.
    ///
    /// When the image carries neither a row nor a column, the anchor falls back
    /// to `row_index` and `column_index`; otherwise the given values are kept and
    /// a missing half resolves to 0.
    pub fn resolve(image: &ExcelImage, row_index: u32, column_index: u32) -> Self {
        let pos = image.position.unwrap_or_default();
        let (row, column) = if image.lacks_placement() {
            (row_index, column_index)
        } else {
            (pos.row.unwrap_or(0), pos.column.unwrap_or(0))
        };

        Self {
            id: image.id.clone(),
            image_type: image.image_type,
            row,
            column,
            row_span: pos.row_span.unwrap_or(1).max(1),
            col_span: pos.col_span.unwrap_or(1).max(1),
            offset_x: pos.offset_x.unwrap_or(0),
            offset_y: pos.offset_y.unwrap_or(0),
            width: image.width,
            height: image.height,
            alt_text: image.alt_text.clone(),
        }
    }
}
