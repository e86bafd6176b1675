//! Core properties template (`docProps/core.xml`).
use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace;
use chrono::{DateTime, SecondsFormat, Utc};

/// Package core properties written by the factory.
#[derive(Debug, Clone)]
pub struct CoreProperties {
    pub creator: String,
    pub last_modified_by: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl CoreProperties {
    /// Properties of a package authored by `author` at `timestamp`.
    pub fn new(author: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            creator: author.to_string(),
            last_modified_by: author.to_string(),
            created: timestamp,
            modified: timestamp,
        }
    }

    /// Build the `<cp:coreProperties>` element tree.
    pub fn to_element(&self) -> XmlElement {
        XmlElement::new("cp:coreProperties")
            .attr("xmlns:cp", namespace::OPC_CORE_PROPERTIES)
            .attr("xmlns:dc", namespace::DC_ELEMENTS)
            .attr("xmlns:dcterms", namespace::DC_TERMS)
            .attr("xmlns:dcmitype", namespace::DC_MI_TYPE)
            .attr("xmlns:xsi", namespace::XSI)
            .child(XmlElement::new("dc:creator").text(self.creator.as_str()))
            .child(XmlElement::new("cp:lastModifiedBy").text(self.last_modified_by.as_str()))
            .child(w3cdtf("dcterms:created", &self.created))
            .child(w3cdtf("dcterms:modified", &self.modified))
    }
}

fn w3cdtf(name: &str, timestamp: &DateTime<Utc>) -> XmlElement {
    XmlElement::new(name)
        .attr("xsi:type", "dcterms:W3CDTF")
        .text(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::create_xml;
    use chrono::TimeZone;

    #[test]
    fn test_core_properties_xml() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let xml = create_xml(&CoreProperties::new("Jo <Ops>", timestamp).to_element()).unwrap();

        assert!(xml.contains("<dc:creator>Jo &lt;Ops&gt;</dc:creator>"));
        assert!(xml.contains("<cp:lastModifiedBy>Jo &lt;Ops&gt;</cp:lastModifiedBy>"));
        assert!(xml.contains(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created>"#
        ));
        assert!(xml.contains(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:modified>"#
        ));
    }
}
