//! Generic serializer for [`XmlElement`] trees.

use super::element::XmlElement;
use crate::ooxml::error::{ExportError, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

/// XML declaration emitted in front of every package part.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Serialize `root` as a complete package part, prefixed with [`XML_HEADER`].
pub fn create_xml_part(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(4096)));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(|e| ExportError::Xml(format!("Failed to write XML declaration: {}", e)))?;

    write_element(&mut writer, root)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Xml(format!("Invalid UTF-8 in generated XML: {}", e)))
}

/// Serialize `root` without a declaration.
pub fn create_xml(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(1024)));
    write_element(&mut writer, root)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Xml(format!("Invalid UTF-8 in generated XML: {}", e)))
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| ExportError::Xml(format!("Failed to write <{}/>: {}", element.name, e)))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| ExportError::Xml(format!("Failed to write <{}>: {}", element.name, e)))?;

    if let Some(ref text) = element.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| {
                ExportError::Xml(format!("Failed to write text of <{}>: {}", element.name, e))
            })?;
    }

    for child in &element.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| ExportError::Xml(format!("Failed to close <{}>: {}", element.name, e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_is_prepended() {
        let xml = create_xml_part(&XmlElement::new("sst")).unwrap();
        assert_eq!(xml, format!("{}<sst/>", XML_HEADER));
    }

    #[test]
    fn test_nested_and_escaped() {
        let root = XmlElement::new("si").child(XmlElement::new("t").text("a < b & c"));
        let xml = create_xml(&root).unwrap();
        assert_eq!(xml, "<si><t>a &lt; b &amp; c</t></si>");
    }

    #[test]
    fn test_attribute_escaping() {
        let root = XmlElement::new("sheet").attr("name", r#"Q&A "1""#);
        let xml = create_xml(&root).unwrap();
        assert_eq!(xml, r#"<sheet name="Q&amp;A &quot;1&quot;"/>"#);
    }
}
