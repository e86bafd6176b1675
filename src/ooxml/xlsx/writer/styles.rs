//! Style registry and `xl/styles.xml` template.
//!
//! This module collects the fonts, fills, borders, number formats and cell
//! formats (`xf` records) used by the registered [`ExcelStyle`]s, assigns each a
//! stable index and renders the stylesheet. Worksheet cells refer to styles by
//! the `xf` index returned from [`StyleRegistry::style_index`].

use crate::common::xml::{XmlElement, counted};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::xlsx::format::{
    ExcelAlignment, ExcelBorder, ExcelBorders, ExcelFont, ExcelInterior, ExcelProtection,
    ExcelStyle, FillPattern, to_argb,
};
use indexmap::{IndexMap, IndexSet};

/// First id available for custom number formats.
const FIRST_CUSTOM_NUM_FMT_ID: usize = 164;

/// Built-in number formats that need no `<numFmt>` entry.
const BUILTIN_NUM_FMTS: &[(&str, usize)] = &[
    ("General", 0),
    ("0", 1),
    ("0.00", 2),
    ("#,##0", 3),
    ("#,##0.00", 4),
    ("0%", 9),
    ("0.00%", 10),
    ("0.00E+00", 11),
    ("# ?/?", 12),
    ("# ??/??", 13),
    ("mm-dd-yy", 14),
    ("d-mmm-yy", 15),
    ("d-mmm", 16),
    ("mmm-yy", 17),
    ("h:mm AM/PM", 18),
    ("h:mm:ss AM/PM", 19),
    ("h:mm", 20),
    ("h:mm:ss", 21),
    ("m/d/yy h:mm", 22),
    ("@", 49),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct FontRecord {
    name: Option<String>,
    /// Point size as raw bits so the record stays hashable
    size_bits: Option<u64>,
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    color: Option<String>,
}

impl From<&ExcelFont> for FontRecord {
    fn from(font: &ExcelFont) -> Self {
        Self {
            name: font.font_name.clone(),
            size_bits: font.size.map(f64::to_bits),
            bold: font.bold,
            italic: font.italic,
            underline: font.underline,
            strike: font.strike_through,
            color: font.color.as_deref().map(to_argb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FillRecord {
    pattern: FillPattern,
    fg_color: Option<String>,
    bg_color: Option<String>,
}

impl From<&ExcelInterior> for FillRecord {
    fn from(interior: &ExcelInterior) -> Self {
        Self {
            pattern: interior.pattern,
            fg_color: interior.color.as_deref().map(to_argb),
            bg_color: interior.pattern_color.as_deref().map(to_argb),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
struct XfRecord {
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    num_fmt_id: usize,
    alignment_id: Option<usize>,
    protection_id: Option<usize>,
}

/// Registry of the cell styles used by one export.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    fonts: IndexSet<FontRecord>,
    fills: IndexSet<FillRecord>,
    borders: IndexSet<ExcelBorders>,
    number_formats: IndexSet<String>,
    alignments: IndexSet<ExcelAlignment>,
    protections: IndexSet<ExcelProtection>,
    cell_xfs: IndexSet<XfRecord>,
    /// Style id -> index into `cell_xfs`
    style_ids: IndexMap<String, usize>,
}

impl StyleRegistry {
    /// Create a registry holding only the defaults Excel requires.
    pub fn new() -> Self {
        let mut registry = Self {
            fonts: IndexSet::new(),
            fills: IndexSet::new(),
            borders: IndexSet::new(),
            number_formats: IndexSet::new(),
            alignments: IndexSet::new(),
            protections: IndexSet::new(),
            cell_xfs: IndexSet::new(),
            style_ids: IndexMap::new(),
        };
        registry.add_defaults();
        registry
    }

    fn add_defaults(&mut self) {
        // Font 0 takes the stylesheet's default size
        self.fonts.insert(FontRecord::default());

        // Fills 0 and 1 are reserved by Excel and must come first
        for pattern in [FillPattern::None, FillPattern::Gray125] {
            self.fills.insert(FillRecord {
                pattern,
                fg_color: None,
                bg_color: None,
            });
        }

        self.borders.insert(ExcelBorders::default());
        self.cell_xfs.insert(XfRecord::default());
    }

    /// Add `styles` to the registry.
    ///
    /// Styles with equal formatting share one `xf` record. Records are never
    /// removed, so `s` indices written into earlier sheets stay valid when a
    /// later sheet registers a different style list. A repeated style id
    /// points at its last definition from then on.
    pub fn register_styles(&mut self, styles: &[ExcelStyle]) {
        for style in styles {
            let xf = self.add_style(style);
            self.style_ids.insert(style.id.clone(), xf);
        }
        log::debug!(
            "registered {} styles into {} cell formats",
            self.style_ids.len(),
            self.cell_xfs.len()
        );
    }

    /// `xf` index of a registered style id.
    pub fn style_index(&self, style_id: &str) -> Option<usize> {
        self.style_ids.get(style_id).copied()
    }

    /// Drop every registered style, keeping the required defaults.
    pub fn clear(&mut self) {
        self.fonts.clear();
        self.fills.clear();
        self.borders.clear();
        self.number_formats.clear();
        self.alignments.clear();
        self.protections.clear();
        self.cell_xfs.clear();
        self.style_ids.clear();
        self.add_defaults();
    }

    fn add_style(&mut self, style: &ExcelStyle) -> usize {
        let font_id = style
            .font
            .as_ref()
            .map(|font| self.fonts.insert_full(FontRecord::from(font)).0)
            .unwrap_or(0);

        let fill_id = style
            .interior
            .as_ref()
            .map(|interior| self.fills.insert_full(FillRecord::from(interior)).0)
            .unwrap_or(0);

        let border_id = style
            .borders
            .as_ref()
            .map(|borders| self.borders.insert_full(normalize_borders(borders)).0)
            .unwrap_or(0);

        let num_fmt_id = style
            .number_format
            .as_ref()
            .map(|fmt| self.add_number_format(&fmt.format))
            .unwrap_or(0);

        let alignment_id = style
            .alignment
            .as_ref()
            .map(|alignment| self.alignments.insert_full(alignment.clone()).0);

        let protection_id = style
            .protection
            .as_ref()
            .map(|protection| self.protections.insert_full(protection.clone()).0);

        let (index, _) = self.cell_xfs.insert_full(XfRecord {
            font_id,
            fill_id,
            border_id,
            num_fmt_id,
            alignment_id,
            protection_id,
        });
        index
    }

    /// Add a number format and return its id.
    fn add_number_format(&mut self, format: &str) -> usize {
        if let Some(&(_, id)) = BUILTIN_NUM_FMTS.iter().find(|(code, _)| *code == format) {
            return id;
        }

        let (index, _) = self.number_formats.insert_full(format.to_string());
        FIRST_CUSTOM_NUM_FMT_ID + index
    }

    /// Build the `<styleSheet>` element tree for `xl/styles.xml`.
    pub fn to_element(&self, default_font_size: f64) -> XmlElement {
        let mut root = XmlElement::new("styleSheet").attr("xmlns", namespace::SML_MAIN);

        if !self.number_formats.is_empty() {
            root = root.child(counted(
                "numFmts",
                self.number_formats
                    .iter()
                    .enumerate()
                    .map(|(i, code)| {
                        XmlElement::new("numFmt")
                            .attr("numFmtId", FIRST_CUSTOM_NUM_FMT_ID + i)
                            .attr("formatCode", code)
                    })
                    .collect(),
            ));
        }

        root.child(counted(
            "fonts",
            self.fonts
                .iter()
                .map(|font| font_element(font, default_font_size))
                .collect(),
        ))
        .child(counted("fills", self.fills.iter().map(fill_element).collect()))
        .child(counted(
            "borders",
            self.borders.iter().map(border_element).collect(),
        ))
        .child(counted(
            "cellStyleXfs",
            vec![
                XmlElement::new("xf")
                    .attr("numFmtId", 0)
                    .attr("fontId", 0)
                    .attr("fillId", 0)
                    .attr("borderId", 0),
            ],
        ))
        .child(counted(
            "cellXfs",
            self.cell_xfs.iter().map(|xf| self.xf_element(xf)).collect(),
        ))
        .child(counted(
            "cellStyles",
            vec![
                XmlElement::new("cellStyle")
                    .attr("name", "Normal")
                    .attr("xfId", 0)
                    .attr("builtinId", 0),
            ],
        ))
    }

    fn xf_element(&self, xf: &XfRecord) -> XmlElement {
        let alignment = xf.alignment_id.and_then(|id| self.alignments.get_index(id));
        let protection = xf.protection_id.and_then(|id| self.protections.get_index(id));

        XmlElement::new("xf")
            .attr("numFmtId", xf.num_fmt_id)
            .attr("fontId", xf.font_id)
            .attr("fillId", xf.fill_id)
            .attr("borderId", xf.border_id)
            .attr("xfId", 0)
            .flag("applyNumberFormat", xf.num_fmt_id != 0)
            .flag("applyFont", xf.font_id != 0)
            .flag("applyFill", xf.fill_id != 0)
            .flag("applyBorder", xf.border_id != 0)
            .flag("applyAlignment", alignment.is_some())
            .flag("applyProtection", protection.is_some())
            .child_opt(alignment.map(alignment_element))
            .child_opt(protection.map(protection_element))
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_borders(borders: &ExcelBorders) -> ExcelBorders {
    let side = |b: &Option<ExcelBorder>| {
        b.as_ref().map(|b| ExcelBorder {
            line_style: b.line_style,
            color: b.color.as_deref().map(to_argb),
        })
    };
    ExcelBorders {
        border_left: side(&borders.border_left),
        border_right: side(&borders.border_right),
        border_top: side(&borders.border_top),
        border_bottom: side(&borders.border_bottom),
    }
}

fn font_element(font: &FontRecord, default_font_size: f64) -> XmlElement {
    let size = font.size_bits.map(f64::from_bits).unwrap_or(default_font_size);
    let is_default = *font == FontRecord::default();

    let mut el = XmlElement::new("font");
    if font.bold {
        el = el.child(XmlElement::new("b"));
    }
    if font.italic {
        el = el.child(XmlElement::new("i"));
    }
    if font.underline {
        el = el.child(XmlElement::new("u"));
    }
    if font.strike {
        el = el.child(XmlElement::new("strike"));
    }

    el = el.child(XmlElement::new("sz").attr("val", size));
    el = match font.color {
        Some(ref color) => el.child(XmlElement::new("color").attr("rgb", color)),
        None => el.child(XmlElement::new("color").attr("theme", 1)),
    };
    el = el.child(XmlElement::new("name").attr("val", font.name.as_deref().unwrap_or("Calibri")));

    if font.name.is_none() {
        el = el.child(XmlElement::new("family").attr("val", 2));
    }
    if is_default {
        el = el.child(XmlElement::new("scheme").attr("val", "minor"));
    }
    el
}

fn fill_element(fill: &FillRecord) -> XmlElement {
    let pattern = XmlElement::new("patternFill")
        .attr("patternType", fill.pattern.as_str())
        .child_opt(
            fill.fg_color
                .as_ref()
                .map(|c| XmlElement::new("fgColor").attr("rgb", c)),
        )
        .child_opt(
            fill.bg_color
                .as_ref()
                .map(|c| XmlElement::new("bgColor").attr("rgb", c)),
        );
    XmlElement::new("fill").child(pattern)
}

fn border_element(border: &ExcelBorders) -> XmlElement {
    let side = |name: &str, side: &Option<ExcelBorder>| match side {
        Some(b) => XmlElement::new(name)
            .attr("style", b.line_style.as_str())
            .child_opt(b.color.as_ref().map(|c| XmlElement::new("color").attr("rgb", c))),
        None => XmlElement::new(name),
    };

    XmlElement::new("border")
        .child(side("left", &border.border_left))
        .child(side("right", &border.border_right))
        .child(side("top", &border.border_top))
        .child(side("bottom", &border.border_bottom))
        .child(XmlElement::new("diagonal"))
}

fn alignment_element(alignment: &ExcelAlignment) -> XmlElement {
    XmlElement::new("alignment")
        .attr_opt("horizontal", alignment.horizontal.as_deref())
        .attr_opt("vertical", alignment.vertical.as_deref())
        .attr_opt("indent", alignment.indent)
        .attr_opt("textRotation", alignment.rotate)
        .flag("wrapText", alignment.wrap_text)
        .flag("shrinkToFit", alignment.shrink_to_fit)
}

fn protection_element(protection: &ExcelProtection) -> XmlElement {
    XmlElement::new("protection")
        .attr("locked", if protection.protected { 1 } else { 0 })
        .flag("hidden", protection.hide_formula)
}
