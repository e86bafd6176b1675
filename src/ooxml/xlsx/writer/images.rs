//! Image registries of an export session.
//!
//! Three views are kept in step by [`ImageRegistry::register`]:
//! - per image id, the sheets it appears on and its placements there;
//! - per image id, its format and global workbook sequence number, which names
//!   the packaged media file;
//! - per sheet, the deduplicated placements that end up in the sheet's drawing.

use crate::ooxml::xlsx::image::{ExcelImage, ImageType, PlacedImage};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Placements of one image on one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetImages {
    pub sheet_index: usize,
    pub placements: Vec<PlacedImage>,
}

/// Workbook-wide entry of a distinct image.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookImage {
    pub image_type: ImageType,
    /// Zero-based registration order across the workbook
    pub index: usize,
    /// Payload of the first registration
    pub base64: String,
}

impl WorkbookImage {
    /// Media file name inside `xl/media/`.
    pub fn file_name(&self) -> String {
        format!("image{}.{}", self.index + 1, self.image_type.extension())
    }
}

#[derive(Debug, Default, Clone)]
pub struct ImageRegistry {
    images: IndexMap<String, Vec<SheetImages>>,
    workbook_images: IndexMap<String, WorkbookImage>,
    sheet_images: BTreeMap<usize, Vec<PlacedImage>>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `placed` (resolved from `image`) on sheet `sheet_index`.
    pub fn register(&mut self, sheet_index: usize, image: &ExcelImage, placed: PlacedImage) {
        match self.images.get_mut(&image.id) {
            Some(sheets) => match sheets.iter_mut().find(|s| s.sheet_index == sheet_index) {
                Some(sheet) => sheet.placements.push(placed.clone()),
                None => sheets.push(SheetImages {
                    sheet_index,
                    placements: vec![placed.clone()],
                }),
            },
            None => {
                let index = self.workbook_images.len();
                self.images.insert(
                    image.id.clone(),
                    vec![SheetImages {
                        sheet_index,
                        placements: vec![placed.clone()],
                    }],
                );
                self.workbook_images.insert(
                    image.id.clone(),
                    WorkbookImage {
                        image_type: image.image_type,
                        index,
                        base64: image.base64.clone(),
                    },
                );
                log::trace!("image '{}' registered as workbook image #{}", image.id, index);
            },
        }

        let sheet = self.sheet_images.entry(sheet_index).or_default();
        if !sheet.contains(&placed) {
            sheet.push(placed);
        }
    }

    /// Sheets and placements of an image id.
    pub fn image_sheets(&self, id: &str) -> Option<&[SheetImages]> {
        self.images.get(id).map(Vec::as_slice)
    }

    /// Workbook entry of an image id.
    pub fn workbook_image(&self, id: &str) -> Option<&WorkbookImage> {
        self.workbook_images.get(id)
    }

    /// Workbook images in sequence order.
    pub fn workbook_images(&self) -> impl Iterator<Item = (&str, &WorkbookImage)> {
        self.workbook_images.iter().map(|(id, img)| (id.as_str(), img))
    }

    /// Deduplicated placements on a sheet, in registration order.
    pub fn sheet_images(&self, sheet_index: usize) -> Option<&[PlacedImage]> {
        self.sheet_images
            .get(&sheet_index)
            .map(Vec::as_slice)
            .filter(|images| !images.is_empty())
    }

    /// Image ids present on a sheet, each once, in first-placement order.
    ///
    /// Drawing relationship IDs follow this order: the n-th id is `rId<n+1>`.
    pub fn distinct_sheet_image_ids(&self, sheet_index: usize) -> Option<Vec<&str>> {
        let images = self.sheet_images(sheet_index)?;
        let mut ids: Vec<&str> = Vec::with_capacity(images.len());
        for image in images {
            if !ids.contains(&image.id.as_str()) {
                ids.push(&image.id);
            }
        }
        Some(ids)
    }

    /// Sheets that carry at least one image, ascending.
    pub fn sheets_with_images(&self) -> impl Iterator<Item = usize> + '_ {
        self.sheet_images
            .iter()
            .filter(|(_, images)| !images.is_empty())
            .map(|(&sheet, _)| sheet)
    }

    /// Zero-based drawing number of a sheet: its rank among sheets with images.
    pub fn drawing_index(&self, sheet_index: usize) -> Option<usize> {
        self.sheets_with_images().position(|s| s == sheet_index)
    }

    pub fn is_empty(&self) -> bool {
        self.workbook_images.is_empty()
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.workbook_images.clear();
        self.sheet_images.clear();
    }
}
