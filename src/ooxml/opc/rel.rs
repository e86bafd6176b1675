//! Relationship parts for OPC packages.
//!
//! A relationship part (`*.rels`) maps relationship IDs to a target part and a
//! type URI. Other parts refer to their targets by ID, so IDs are allocated
//! sequentially (`rId1`, `rId2`, ...) in insertion order and never reordered.

use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference, relative to the source part
    target_ref: String,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(r_id: String, reltype: String, target_ref: String) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    fn to_element(&self) -> XmlElement {
        XmlElement::new("Relationship")
            .attr("Id", &self.r_id)
            .attr("Type", &self.reltype)
            .attr("Target", &self.target_ref)
    }
}

/// Ordered collection of relationships from a single source part.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self { rels: Vec::new() }
    }

    /// Add a relationship with the next available rId.
    ///
    /// # Returns
    /// Reference to the newly added relationship
    pub fn add(&mut self, reltype: &str, target_ref: impl Into<String>) -> &Relationship {
        let r_id = self.next_r_id();
        let index = self.rels.len();
        self.rels
            .push(Relationship::new(r_id, reltype.to_string(), target_ref.into()));
        &self.rels[index]
    }

    /// Next relationship ID; IDs are never removed, so this is `rId<len + 1>`.
    fn next_r_id(&self) -> String {
        format!("rId{}", itoa::Buffer::new().format(self.rels.len() + 1))
    }

    /// Get an iterator over all relationships in ID order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Build the `<Relationships>` element tree for a `.rels` part.
    pub fn to_element(&self) -> XmlElement {
        XmlElement::new("Relationships")
            .attr("xmlns", namespace::OPC_RELATIONSHIPS)
            .children(self.rels.iter().map(Relationship::to_element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::create_xml;

    #[test]
    fn test_sequential_ids() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add("type1", "target1").r_id(), "rId1");
        assert_eq!(rels.add("type1", "target1").r_id(), "rId2");
        assert_eq!(rels.add("type2", "target2").r_id(), "rId3");
        assert_eq!(rels.len(), 3);
        assert_eq!(rels.iter().last().map(|r| r.target_ref()), Some("target2"));
    }

    #[test]
    fn test_to_element() {
        let mut rels = Relationships::new();
        rels.add("urn:a", "a.xml");
        rels.add("urn:b", "b.xml");
        let xml = create_xml(&rels.to_element()).unwrap();

        assert!(xml.starts_with(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#));
        assert!(xml.contains(r#"<Relationship Id="rId1" Type="urn:a" Target="a.xml"/>"#));
        assert!(xml.contains(r#"<Relationship Id="rId2" Type="urn:b" Target="b.xml"/>"#));
    }
}
