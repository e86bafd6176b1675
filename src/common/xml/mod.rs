//! XML element tree and serializer shared by all part templates.

pub mod element;
pub mod writer;

pub use element::{XmlElement, counted};
pub use writer::{XML_HEADER, create_xml, create_xml_part};
