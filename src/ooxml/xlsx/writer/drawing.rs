//! Drawing templates (`xl/drawings/drawing<K>.xml` and its relationships).
//!
//! Each distinct image id on a sheet gets one image relationship, numbered
//! `rId1..` in first-seen order. Every placement of that image embeds the same
//! relationship, so repeated placements share one media file.

use crate::common::unit::px_to_emu_96;
use crate::common::xml::XmlElement;
use crate::ooxml::error::{ExportError, Result};
use crate::ooxml::opc::Relationships;
use crate::ooxml::opc::constants::{namespace, relationship_type as rt};
use crate::ooxml::xlsx::cell::{MAX_COLUMNS, MAX_ROWS};
use crate::ooxml::xlsx::image::PlacedImage;

use super::images::ImageRegistry;

/// Relationship id of the `index`-th distinct image of a drawing.
fn image_rel_id(index: usize) -> String {
    format!("rId{}", itoa::Buffer::new().format(index + 1))
}

/// Build the drawing relationships of `sheet_index`.
pub fn drawing_relationships(images: &ImageRegistry, sheet_index: usize) -> Result<Relationships> {
    let ids = images
        .distinct_sheet_image_ids(sheet_index)
        .ok_or(ExportError::NoSheetImages(sheet_index))?;

    let mut rels = Relationships::new();
    for id in ids {
        let image = images
            .workbook_image(id)
            .ok_or_else(|| ExportError::UnknownImage(id.to_string()))?;
        rels.add(rt::IMAGE, format!("../media/{}", image.file_name()));
    }
    Ok(rels)
}

/// Build the `<xdr:wsDr>` element tree of `sheet_index`.
pub fn drawing_element(images: &ImageRegistry, sheet_index: usize) -> Result<XmlElement> {
    let placements = images
        .sheet_images(sheet_index)
        .ok_or(ExportError::NoSheetImages(sheet_index))?;
    let ids = images
        .distinct_sheet_image_ids(sheet_index)
        .ok_or(ExportError::NoSheetImages(sheet_index))?;

    let mut root = XmlElement::new("xdr:wsDr")
        .attr("xmlns:xdr", namespace::DML_SPREADSHEET_DRAWING)
        .attr("xmlns:a", namespace::DML_MAIN)
        .attr("xmlns:r", namespace::OFC_RELATIONSHIPS);

    for (idx, placed) in placements.iter().enumerate() {
        let rel_index = ids
            .iter()
            .position(|id| *id == placed.id)
            .ok_or_else(|| ExportError::UnknownImage(placed.id.clone()))?;
        root = root.child(anchor_element(placed, idx + 1, &image_rel_id(rel_index)));
    }

    Ok(root)
}

fn marker(name: &str, col: u32, col_off: i64, row: u32, row_off: i64) -> XmlElement {
    XmlElement::new(name)
        .child(XmlElement::new("xdr:col").text(col.to_string()))
        .child(XmlElement::new("xdr:colOff").text(col_off.to_string()))
        .child(XmlElement::new("xdr:row").text(row.to_string()))
        .child(XmlElement::new("xdr:rowOff").text(row_off.to_string()))
}

/// Two-cell anchor for one placement; `shape_id` must be unique within the drawing.
fn anchor_element(placed: &PlacedImage, shape_id: usize, rel_id: &str) -> XmlElement {
    // Anchors are zero-based; placements are one-based
    let col = placed.column.saturating_sub(1).min(MAX_COLUMNS - 1);
    let row = placed.row.saturating_sub(1).min(MAX_ROWS - 1);
    let col_off = px_to_emu_96(placed.offset_x);
    let row_off = px_to_emu_96(placed.offset_y);

    let name = format!("Picture {}", shape_id);
    let non_visual = XmlElement::new("xdr:nvPicPr")
        .child(
            XmlElement::new("xdr:cNvPr")
                .attr("id", shape_id)
                .attr("name", name)
                .attr_opt("descr", placed.alt_text.as_deref()),
        )
        .child(
            XmlElement::new("xdr:cNvPicPr")
                .child(XmlElement::new("a:picLocks").attr("noChangeAspect", 1)),
        );

    let blip_fill = XmlElement::new("xdr:blipFill")
        .child(XmlElement::new("a:blip").attr("r:embed", rel_id))
        .child(XmlElement::new("a:stretch").child(XmlElement::new("a:fillRect")));

    let shape = XmlElement::new("xdr:spPr")
        .child(
            XmlElement::new("a:xfrm")
                .child(XmlElement::new("a:off").attr("x", 0).attr("y", 0))
                .child(
                    XmlElement::new("a:ext")
                        .attr("cx", placed.width.map(px_to_emu_96).unwrap_or(0))
                        .attr("cy", placed.height.map(px_to_emu_96).unwrap_or(0)),
                ),
        )
        .child(
            XmlElement::new("a:prstGeom")
                .attr("prst", "rect")
                .child(XmlElement::new("a:avLst")),
        );

    XmlElement::new("xdr:twoCellAnchor")
        .attr("editAs", "oneCell")
        .child(marker("xdr:from", col, col_off, row, row_off))
        .child(marker(
            "xdr:to",
            col.saturating_add(placed.col_span).min(MAX_COLUMNS - 1),
            col_off,
            row.saturating_add(placed.row_span).min(MAX_ROWS - 1),
            row_off,
        ))
        .child(
            XmlElement::new("xdr:pic")
                .child(non_visual)
                .child(blip_fill)
                .child(shape),
        )
        .child(XmlElement::new("xdr:clientData"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::create_xml;
    use crate::ooxml::xlsx::image::{ExcelImage, ImagePosition, ImageType};

    fn image(id: &str, image_type: ImageType) -> ExcelImage {
        ExcelImage {
            id: id.to_string(),
            base64: "AAAA".to_string(),
            image_type,
            width: Some(96),
            height: Some(48),
            ..Default::default()
        }
    }

    fn registry() -> ImageRegistry {
        let mut images = ImageRegistry::new();
        let logo = image("logo", ImageType::Png);
        let chart = image("chart", ImageType::Jpg);

        // "chart" is registered first so it owns media file image1
        images.register(0, &chart, PlacedImage::resolve(&chart, 9, 1));
        images.register(1, &logo, PlacedImage::resolve(&logo, 2, 3));
        images.register(1, &chart, PlacedImage::resolve(&chart, 4, 1));
        images.register(1, &logo, PlacedImage::resolve(&logo, 6, 3));
        images
    }

    #[test]
    fn test_drawing_relationships() {
        let rels = drawing_relationships(&registry(), 1).unwrap();
        let targets: Vec<_> = rels.iter().map(|r| (r.r_id(), r.target_ref())).collect();
        assert_eq!(
            targets,
            [("rId1", "../media/image2.png"), ("rId2", "../media/image1.jpg")]
        );
    }

    #[test]
    fn test_drawing_anchors() {
        let el = drawing_element(&registry(), 1).unwrap();
        let anchors: Vec<_> = el.find_all("xdr:twoCellAnchor").collect();
        assert_eq!(anchors.len(), 3);

        // Both logo placements embed the same relationship
        let embeds: Vec<_> = anchors
            .iter()
            .map(|a| {
                a.find("xdr:pic")
                    .and_then(|p| p.find("xdr:blipFill"))
                    .and_then(|b| b.find("a:blip"))
                    .and_then(|b| b.attribute("r:embed"))
                    .unwrap()
            })
            .collect();
        assert_eq!(embeds, ["rId1", "rId2", "rId1"]);

        let xml = create_xml(anchors[0]).unwrap();
        assert!(xml.contains(concat!(
            "<xdr:from><xdr:col>2</xdr:col><xdr:colOff>0</xdr:colOff>",
            "<xdr:row>1</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>",
            "<xdr:to><xdr:col>3</xdr:col><xdr:colOff>0</xdr:colOff>",
            "<xdr:row>2</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>"
        )));
        assert!(xml.contains(r#"<xdr:cNvPr id="1" name="Picture 1"/>"#));
        assert!(xml.contains(r#"<a:ext cx="914400" cy="457200"/>"#));
    }

    #[test]
    fn test_offsets_and_spans() {
        let mut images = ImageRegistry::new();
        let mut img = image("logo", ImageType::Gif);
        img.alt_text = Some("Company logo".to_string());
        img.position = Some(ImagePosition {
            row: Some(1),
            column: Some(1),
            row_span: Some(3),
            col_span: Some(2),
            offset_x: Some(10),
            offset_y: Some(4),
        });
        images.register(0, &img, PlacedImage::resolve(&img, 7, 7));

        let xml = create_xml(&drawing_element(&images, 0).unwrap()).unwrap();
        assert!(xml.contains(
            "<xdr:to><xdr:col>2</xdr:col><xdr:colOff>95250</xdr:colOff><xdr:row>3</xdr:row><xdr:rowOff>38100</xdr:rowOff></xdr:to>"
        ));
        assert!(xml.contains(r#"descr="Company logo""#));
    }

    #[test]
    fn test_oversized_placement_is_clamped() {
        let mut images = ImageRegistry::new();
        let mut img = image("banner", ImageType::Png);
        img.position = Some(ImagePosition {
            row: Some(u32::MAX),
            column: Some(u32::MAX),
            row_span: Some(u32::MAX),
            col_span: Some(u32::MAX),
            offset_x: None,
            offset_y: None,
        });
        images.register(0, &img, PlacedImage::resolve(&img, 1, 1));

        let xml = create_xml(&drawing_element(&images, 0).unwrap()).unwrap();
        assert!(xml.contains(concat!(
            "<xdr:from><xdr:col>16383</xdr:col><xdr:colOff>0</xdr:colOff>",
            "<xdr:row>1048575</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>",
            "<xdr:to><xdr:col>16383</xdr:col><xdr:colOff>0</xdr:colOff>",
            "<xdr:row>1048575</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>"
        )));
    }

    #[test]
    fn test_sheet_without_images() {
        let images = registry();
        assert!(matches!(
            drawing_element(&images, 5),
            Err(ExportError::NoSheetImages(5))
        ));
        assert!(matches!(
            drawing_relationships(&images, 5),
            Err(ExportError::NoSheetImages(5))
        ));
    }
}
