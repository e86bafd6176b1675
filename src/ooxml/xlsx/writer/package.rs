//! Named package parts handed to the ZIP packager.

/// Content of a package part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    /// Serialized XML, declaration included
    Xml(String),
    /// Decoded media bytes
    Binary(Vec<u8>),
}

/// A file of the OOXML package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagePart {
    /// Path inside the archive, without a leading slash (e.g. `xl/workbook.xml`)
    pub path: String,
    pub content: PartContent,
}

impl PackagePart {
    pub fn xml(path: impl Into<String>, xml: String) -> Self {
        Self {
            path: path.into(),
            content: PartContent::Xml(xml),
        }
    }

    pub fn binary(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content: PartContent::Binary(bytes),
        }
    }

    /// Raw bytes of the part as stored in the archive.
    pub fn as_bytes(&self) -> &[u8] {
        match self.content {
            PartContent::Xml(ref xml) => xml.as_bytes(),
            PartContent::Binary(ref bytes) => bytes,
        }
    }

    /// XML text of the part, if it is an XML part.
    pub fn as_xml(&self) -> Option<&str> {
        match self.content {
            PartContent::Xml(ref xml) => Some(xml),
            PartContent::Binary(_) => None,
        }
    }
}
