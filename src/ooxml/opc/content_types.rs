//! Builder for `[Content_Types].xml`.

use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use indexmap::IndexMap;

/// Default and Override content type mappings of a package.
///
/// Entries are emitted in insertion order. Re-adding an extension or part name
/// replaces its content type in place.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    /// Default content types by extension
    defaults: IndexMap<String, String>,

    /// Override content types by partname
    overrides: IndexMap<String, String>,
}

impl ContentTypes {
    /// Create a mapping with the standard `rels` and `xml` defaults.
    pub fn new() -> Self {
        let mut defaults = IndexMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: IndexMap::new(),
        }
    }

    /// Map every part with extension `ext` to `content_type`.
    pub fn add_default(&mut self, ext: &str, content_type: &str) {
        self.defaults
            .insert(ext.to_ascii_lowercase(), content_type.to_string());
    }

    /// Map the part `partname` (absolute, e.g. `/xl/workbook.xml`) to `content_type`.
    pub fn add_override(&mut self, partname: impl Into<String>, content_type: &str) {
        self.overrides
            .insert(partname.into(), content_type.to_string());
    }

    /// Build the `<Types>` element tree.
    pub fn to_element(&self) -> XmlElement {
        let defaults = self.defaults.iter().map(|(ext, content_type)| {
            XmlElement::new("Default")
                .attr("Extension", ext)
                .attr("ContentType", content_type)
        });
        let overrides = self.overrides.iter().map(|(partname, content_type)| {
            XmlElement::new("Override")
                .attr("PartName", partname)
                .attr("ContentType", content_type)
        });

        XmlElement::new("Types")
            .attr("xmlns", namespace::OPC_CONTENT_TYPES)
            .children(defaults)
            .children(overrides)
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}
