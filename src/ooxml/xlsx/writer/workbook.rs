//! Workbook template (`xl/workbook.xml`).
use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace;

/// Build the `<workbook>` element tree for the given sheet names.
///
/// Sheet `i` (zero-based) gets `sheetId` `i + 1` and relationship `rId{i + 1}`,
/// matching the worksheet entries of `xl/_rels/workbook.xml.rels`.
pub fn workbook_element(sheet_names: &[String]) -> XmlElement {
    let mut buffer = itoa::Buffer::new();
    let sheets = sheet_names.iter().enumerate().map(|(index, name)| {
        let sheet_id = index + 1;
        XmlElement::new("sheet")
            .attr("name", name)
            .attr("sheetId", sheet_id)
            .attr("r:id", format!("rId{}", buffer.format(sheet_id)))
    });

    XmlElement::new("workbook")
        .attr("xmlns", namespace::SML_MAIN)
        .attr("xmlns:r", namespace::OFC_RELATIONSHIPS)
        .child(
            XmlElement::new("bookViews").child(
                XmlElement::new("workbookView")
                    .attr("xWindow", 0)
                    .attr("yWindow", 0)
                    .attr("windowWidth", 28800)
                    .attr("windowHeight", 12300),
            ),
        )
        .child(XmlElement::new("sheets").children(sheets))
}
