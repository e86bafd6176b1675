//! Worksheet template (`xl/worksheets/sheet<N>.xml`).
//!
//! Cell text is interned into the session's [`SharedStringTable`] while the
//! sheet is rendered, so a sheet must be rendered before the shared strings
//! part is requested.

use crate::common::unit::{px_to_column_width, px_to_pt};
use crate::common::xml::{XmlElement, counted};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::xlsx::cell::{MAX_COLUMNS, MAX_ROWS, cell_reference, range_reference};
use crate::ooxml::xlsx::worksheet::{
    ExcelCell, ExcelColumn, ExcelDataType, ExcelRow, ExcelWorksheet, HeaderFooterConfig,
    PageSetup, SheetMargin,
};

use super::strings::SharedStringTable;
use super::styles::StyleRegistry;

/// Relationship id of the drawing in `xl/worksheets/_rels/sheet<N>.xml.rels`.
pub const DRAWING_REL_ID: &str = "rId1";

/// Everything needed to render one worksheet.
#[derive(Debug, Clone, Copy)]
pub struct WorksheetPart<'a> {
    pub worksheet: &'a ExcelWorksheet,
    /// Zero-based position of the sheet in the workbook
    pub sheet_index: usize,
    pub margins: Option<&'a SheetMargin>,
    pub page_setup: Option<&'a PageSetup>,
    pub header_footer: Option<&'a HeaderFooterConfig>,
    /// Whether the sheet references a drawing part
    pub has_drawing: bool,
}

/// Bounds of the cells written so far, 1-based.
#[derive(Debug, Default)]
struct UsedRange {
    last_row: u32,
    last_col: u32,
}

impl UsedRange {
    fn extend(&mut self, row: u32, col: u32) {
        self.last_row = self.last_row.max(row);
        self.last_col = self.last_col.max(col);
    }

    fn reference(&self) -> String {
        if self.last_row == 0 || self.last_col == 0 {
            return "A1".to_string();
        }
        range_reference((1, 1), (self.last_row, self.last_col))
    }
}

impl WorksheetPart<'_> {
    /// Build the `<worksheet>` element tree.
    pub fn to_element(
        &self,
        strings: &mut SharedStringTable,
        styles: &StyleRegistry,
    ) -> XmlElement {
        let table = &self.worksheet.table;
        let mut used = UsedRange::default();
        let mut merges = Vec::new();

        let rows: Vec<XmlElement> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let row_number = row
                    .index
                    .unwrap_or_else(|| u32::try_from(i + 1).unwrap_or(MAX_ROWS))
                    .clamp(1, MAX_ROWS);
                row_element(row, row_number, strings, styles, &mut used, &mut merges)
            })
            .collect();

        let mut root = XmlElement::new("worksheet")
            .attr("xmlns", namespace::SML_MAIN)
            .attr("xmlns:r", namespace::OFC_RELATIONSHIPS)
            .child(XmlElement::new("dimension").attr("ref", used.reference()))
            .child(
                XmlElement::new("sheetViews").child(
                    XmlElement::new("sheetView")
                        .flag("tabSelected", self.sheet_index == 0)
                        .attr("workbookViewId", 0),
                ),
            )
            .child(XmlElement::new("sheetFormatPr").attr("defaultRowHeight", 15));

        if !table.columns.is_empty() {
            root = root.child(XmlElement::new("cols").children(
                table.columns.iter().enumerate().map(|(i, col)| col_element(i as u32 + 1, col)),
            ));
        }

        root = root.child(XmlElement::new("sheetData").children(rows));

        if !merges.is_empty() {
            root = root.child(counted(
                "mergeCells",
                merges
                    .into_iter()
                    .map(|r| XmlElement::new("mergeCell").attr("ref", r))
                    .collect(),
            ));
        }

        let margins = self.margins.copied().unwrap_or_default();
        root = root.child(
            XmlElement::new("pageMargins")
                .attr("left", margins.left)
                .attr("right", margins.right)
                .attr("top", margins.top)
                .attr("bottom", margins.bottom)
                .attr("header", margins.header)
                .attr("footer", margins.footer),
        );

        if let Some(setup) = self.page_setup {
            root = root.child(
                XmlElement::new("pageSetup")
                    .attr_opt("paperSize", setup.paper_size)
                    .attr("orientation", setup.orientation.as_str()),
            );
        }

        root = root.child_opt(self.header_footer.and_then(header_footer_element));

        if self.has_drawing {
            root = root.child(XmlElement::new("drawing").attr("r:id", DRAWING_REL_ID));
        }

        root
    }
}

fn col_element(number: u32, col: &ExcelColumn) -> XmlElement {
    XmlElement::new("col")
        .attr("min", number)
        .attr("max", number)
        .attr_opt("width", col.width.map(px_to_column_width))
        .flag("customWidth", col.width.is_some())
        .flag("hidden", col.hidden)
}

fn row_element(
    row: &ExcelRow,
    row_number: u32,
    strings: &mut SharedStringTable,
    styles: &StyleRegistry,
    used: &mut UsedRange,
    merges: &mut Vec<String>,
) -> XmlElement {
    let mut el = XmlElement::new("row")
        .attr("r", row_number)
        .attr_opt("ht", row.height.map(px_to_pt))
        .flag("customHeight", row.height.is_some())
        .flag("hidden", row.hidden);

    let mut col = 1u32;
    for cell in &row.cells {
        if col > MAX_COLUMNS {
            log::warn!("row {} has cells past the last column, dropped", row_number);
            break;
        }

        let span = cell.merge_across.unwrap_or(0);
        let last_col = col.saturating_add(span).min(MAX_COLUMNS);
        if last_col > col {
            merges.push(range_reference((row_number, col), (row_number, last_col)));
            used.extend(row_number, last_col);
        }

        if let Some(c) = cell_element(cell, cell_reference(row_number, col), strings, styles) {
            used.extend(row_number, col);
            el = el.child(c);
        }
        col = last_col.saturating_add(1);
    }

    el
}

fn cell_element(
    cell: &ExcelCell,
    reference: String,
    strings: &mut SharedStringTable,
    styles: &StyleRegistry,
) -> Option<XmlElement> {
    let style = cell.style_id.as_deref().and_then(|id| {
        let index = styles.style_index(id);
        if index.is_none() {
            log::warn!("cell {} references unknown style '{}'", reference, id);
        }
        index
    });

    let el = XmlElement::new("c")
        .attr("r", &reference)
        .attr_opt("s", style.filter(|&s| s != 0));

    let Some((data_type, value)) = cell
        .data
        .as_ref()
        .and_then(|d| d.value.as_deref().map(|v| (d.data_type, v)))
    else {
        return style.map(|_| el);
    };

    let el = match data_type {
        ExcelDataType::String => shared_string_cell(el, value, strings),
        ExcelDataType::Number | ExcelDataType::DateTime => match value.trim() {
            v if v.parse::<f64>().is_ok_and(f64::is_finite) => {
                el.child(XmlElement::new("v").text(v))
            },
            _ => {
                log::warn!("cell {} holds non-numeric value, written as text", reference);
                shared_string_cell(el, value, strings)
            },
        },
        ExcelDataType::Boolean => {
            let truthy = matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1");
            el.attr("t", "b")
                .child(XmlElement::new("v").text(if truthy { "1" } else { "0" }))
        },
        ExcelDataType::Error => el.attr("t", "e").child(XmlElement::new("v").text(value)),
        ExcelDataType::Formula => {
            let formula = value.strip_prefix('=').unwrap_or(value);
            el.child(XmlElement::new("f").text(formula))
        },
    };

    Some(el)
}

fn shared_string_cell(el: XmlElement, value: &str, strings: &mut SharedStringTable) -> XmlElement {
    let position = strings.position(value);
    el.attr("t", "s")
        .child(XmlElement::new("v").text(itoa::Buffer::new().format(position)))
}

fn header_footer_element(config: &HeaderFooterConfig) -> Option<XmlElement> {
    let pages = [
        ("odd", Some(&config.all)),
        ("even", config.even.as_ref()),
        ("first", config.first.as_ref()),
    ];

    let mut el = XmlElement::new("headerFooter")
        .flag("differentOddEven", config.even.is_some())
        .flag("differentFirst", config.first.is_some());

    for (prefix, page) in pages {
        let Some(page) = page else { continue };
        for (kind, sections) in [("Header", &page.header), ("Footer", &page.footer)] {
            el = el.child_opt(
                sections
                    .to_code()
                    .map(|code| XmlElement::new(format!("{prefix}{kind}")).text(code)),
            );
        }
    }

    (!el.children.is_empty()).then_some(el)
}
