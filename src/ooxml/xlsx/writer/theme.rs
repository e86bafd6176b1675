//! Office theme template (`xl/theme/theme1.xml`).
//!
//! Themes define the color scheme, fonts and effects Excel falls back to for
//! theme-relative formatting. The stylesheet's default font refers to the
//! minor font of this theme.

use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace;

/// A document theme.
#[derive(Debug, Clone)]
pub struct OfficeTheme {
    /// Theme name
    name: String,
    /// Major font (for headings)
    major_font: String,
    /// Minor font (for body text)
    minor_font: String,
    /// Color scheme
    color_scheme: ColorScheme,
}

/// Color scheme for a theme.
///
/// Defines the 12 theme colors: dark1, light1, dark2, light2, accent1-6, hyperlink, followed hyperlink.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    name: String,
    dk1: &'static str,
    lt1: &'static str,
    dk2: &'static str,
    lt2: &'static str,
    accents: [&'static str; 6],
    hlink: &'static str,
    fol_hlink: &'static str,
}

impl OfficeTheme {
    /// The default Office theme.
    pub fn office() -> Self {
        Self {
            name: "Office Theme".to_string(),
            major_font: "Calibri Light".to_string(),
            minor_font: "Calibri".to_string(),
            color_scheme: ColorScheme::office(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn minor_font(&self) -> &str {
        &self.minor_font
    }

    /// Build the `<a:theme>` element tree.
    pub fn to_element(&self) -> XmlElement {
        let font_scheme = XmlElement::new("a:fontScheme")
            .attr("name", "Office")
            .child(theme_font("a:majorFont", &self.major_font))
            .child(theme_font("a:minorFont", &self.minor_font));

        XmlElement::new("a:theme")
            .attr("xmlns:a", namespace::DML_MAIN)
            .attr("name", &self.name)
            .child(
                XmlElement::new("a:themeElements")
                    .child(self.color_scheme.to_element())
                    .child(font_scheme)
                    .child(format_scheme()),
            )
            .child(XmlElement::new("a:objectDefaults"))
            .child(XmlElement::new("a:extraClrSchemeLst"))
    }
}

impl Default for OfficeTheme {
    fn default() -> Self {
        Self::office()
    }
}

impl ColorScheme {
    /// The default Office color scheme.
    pub fn office() -> Self {
        Self {
            name: "Office".to_string(),
            dk1: "000000",
            lt1: "FFFFFF",
            dk2: "44546A",
            lt2: "E7E6E6",
            accents: ["4472C4", "ED7D31", "A5A5A5", "FFC000", "5B9BD5", "70AD47"],
            hlink: "0563C1",
            fol_hlink: "954F72",
        }
    }

    fn to_element(&self) -> XmlElement {
        // dk1/lt1 follow the system window colors
        let mut el = XmlElement::new("a:clrScheme")
            .attr("name", &self.name)
            .child(XmlElement::new("a:dk1").child(
                XmlElement::new("a:sysClr")
                    .attr("val", "windowText")
                    .attr("lastClr", self.dk1),
            ))
            .child(XmlElement::new("a:lt1").child(
                XmlElement::new("a:sysClr")
                    .attr("val", "window")
                    .attr("lastClr", self.lt1),
            ))
            .child(srgb_slot("a:dk2", self.dk2))
            .child(srgb_slot("a:lt2", self.lt2));

        for (i, accent) in self.accents.iter().enumerate() {
            el = el.child(srgb_slot(&format!("a:accent{}", i + 1), accent));
        }

        el.child(srgb_slot("a:hlink", self.hlink))
            .child(srgb_slot("a:folHlink", self.fol_hlink))
    }
}

fn srgb_slot(name: &str, color: &str) -> XmlElement {
    XmlElement::new(name).child(XmlElement::new("a:srgbClr").attr("val", color))
}

fn theme_font(name: &str, latin: &str) -> XmlElement {
    XmlElement::new(name)
        .child(XmlElement::new("a:latin").attr("typeface", latin))
        .child(XmlElement::new("a:ea").attr("typeface", ""))
        .child(XmlElement::new("a:cs").attr("typeface", ""))
}

fn scheme_color(modifiers: &[(&str, u32)]) -> XmlElement {
    XmlElement::new("a:schemeClr")
        .attr("val", "phClr")
        .children(
            modifiers
                .iter()
                .map(|(name, val)| XmlElement::new(*name).attr("val", val)),
        )
}

fn solid_fill(modifiers: &[(&str, u32)]) -> XmlElement {
    XmlElement::new("a:solidFill").child(scheme_color(modifiers))
}

fn gradient_fill(stops: &[GradientStop], shade: XmlElement) -> XmlElement {
    XmlElement::new("a:gradFill")
        .attr("rotWithShape", 1)
        .child(XmlElement::new("a:gsLst").children(stops.iter().map(|(pos, modifiers)| {
            XmlElement::new("a:gs")
                .attr("pos", pos)
                .child(scheme_color(modifiers))
        })))
        .child(shade)
}

fn linear(scaled: bool) -> XmlElement {
    XmlElement::new("a:lin")
        .attr("ang", 16_200_000)
        .attr("scaled", if scaled { 1 } else { 0 })
}

fn line(width: u32) -> XmlElement {
    XmlElement::new("a:ln")
        .attr("w", width)
        .attr("cap", "flat")
        .attr("cmpd", "sng")
        .attr("algn", "ctr")
        .child(solid_fill(&[]))
        .child(XmlElement::new("a:prstDash").attr("val", "solid"))
        .child(XmlElement::new("a:miter").attr("lim", 800_000))
}

type GradientStop<'a> = (u32, &'a [(&'a str, u32)]);

fn format_scheme() -> XmlElement {
    let subtle: [GradientStop; 3] = [
        (0, &[("a:lumMod", 110_000), ("a:satMod", 105_000), ("a:tint", 67_000)]),
        (50_000, &[("a:lumMod", 105_000), ("a:satMod", 103_000), ("a:tint", 73_000)]),
        (100_000, &[("a:lumMod", 105_000), ("a:satMod", 109_000), ("a:tint", 81_000)]),
    ];
    let moderate: [GradientStop; 3] = [
        (0, &[("a:satMod", 103_000), ("a:lumMod", 102_000), ("a:tint", 94_000)]),
        (50_000, &[("a:satMod", 110_000), ("a:lumMod", 100_000), ("a:shade", 100_000)]),
        (100_000, &[("a:lumMod", 99_000), ("a:satMod", 120_000), ("a:shade", 78_000)]),
    ];
    let background: [GradientStop; 3] = [
        (0, &[("a:tint", 93_000), ("a:satMod", 150_000), ("a:shade", 98_000), ("a:lumMod", 102_000)]),
        (50_000, &[("a:tint", 98_000), ("a:satMod", 130_000), ("a:shade", 90_000), ("a:lumMod", 103_000)]),
        (100_000, &[("a:shade", 63_000), ("a:satMod", 120_000)]),
    ];

    let fills = XmlElement::new("a:fillStyleLst")
        .child(solid_fill(&[]))
        .child(gradient_fill(&subtle, linear(true)))
        .child(gradient_fill(&moderate, linear(false)));

    let lines = XmlElement::new("a:lnStyleLst")
        .child(line(6_350))
        .child(line(12_700))
        .child(line(19_050));

    let plain_effect = || XmlElement::new("a:effectStyle").child(XmlElement::new("a:effectLst"));
    let effects = XmlElement::new("a:effectStyleLst")
        .child(plain_effect())
        .child(plain_effect())
        .child(
            XmlElement::new("a:effectStyle").child(
                XmlElement::new("a:effectLst").child(
                    XmlElement::new("a:outerShdw")
                        .attr("blurRad", 57_150)
                        .attr("dist", 19_050)
                        .attr("dir", 5_400_000)
                        .attr("algn", "ctr")
                        .attr("rotWithShape", 0)
                        .child(
                            XmlElement::new("a:srgbClr")
                                .attr("val", "000000")
                                .child(XmlElement::new("a:alpha").attr("val", 63_000)),
                        ),
                ),
            ),
        );

    let backgrounds = XmlElement::new("a:bgFillStyleLst")
        .child(solid_fill(&[]))
        .child(solid_fill(&[("a:tint", 95_000), ("a:satMod", 170_000)]))
        .child(gradient_fill(&background, linear(false)));

    XmlElement::new("a:fmtScheme")
        .attr("name", "Office")
        .child(fills)
        .child(lines)
        .child(effects)
        .child(backgrounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::create_xml;

    #[test]
    fn test_office_theme() {
        let theme = OfficeTheme::office();
        assert_eq!(theme.name(), "Office Theme");
        assert_eq!(theme.minor_font(), "Calibri");
    }

    #[test]
    fn test_theme_structure() {
        let el = OfficeTheme::default().to_element();
        let elements = el.find("a:themeElements").unwrap();

        let colors = elements.find("a:clrScheme").unwrap();
        assert_eq!(colors.children.len(), 12);
        assert_eq!(colors.children[4].name, "a:accent1");

        let formats = elements.find("a:fmtScheme").unwrap();
        for list in ["a:fillStyleLst", "a:lnStyleLst", "a:effectStyleLst", "a:bgFillStyleLst"] {
            assert_eq!(formats.find(list).unwrap().children.len(), 3, "{list}");
        }
    }

    #[test]
    fn test_xml_generation() {
        let xml = create_xml(&OfficeTheme::office().to_element()).unwrap();
        assert!(xml.starts_with(
            r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">"#
        ));
        assert!(xml.contains(r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/>"#));
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1>"#));
        assert!(xml.ends_with("<a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"));
    }
}
