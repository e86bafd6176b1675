//! Shared strings table for XLSX workbooks.

use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace;
use indexmap::IndexSet;

/// Session-scoped shared strings table.
///
/// Excel stores text cell values once in `xl/sharedStrings.xml` and refers to
/// them by position from worksheet XML. Positions are dense, zero-based and
/// follow first-seen order; a position never changes once assigned.
#[derive(Debug, Default, Clone)]
pub struct SharedStringTable {
    strings: IndexSet<String>,
}

impl SharedStringTable {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self {
            strings: IndexSet::new(),
        }
    }

    /// Return the position of `value`, interning it first if it is new.
    pub fn position(&mut self, value: &str) -> usize {
        if let Some(index) = self.strings.get_index_of(value) {
            return index;
        }

        let (index, _) = self.strings.insert_full(value.to_string());
        log::trace!("interned shared string #{}", index);
        index
    }

    /// Position of an already interned string.
    pub fn get(&self, value: &str) -> Option<usize> {
        self.strings.get_index_of(value)
    }

    /// Get the number of unique strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over strings in position order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.strings.clear();
    }

    /// Build the `<sst>` element tree for `xl/sharedStrings.xml`.
    pub fn to_element(&self) -> XmlElement {
        XmlElement::new("sst")
            .attr("xmlns", namespace::SML_MAIN)
            .attr("count", self.strings.len())
            .attr("uniqueCount", self.strings.len())
            .children(self.strings.iter().map(|s| {
                let mut t = XmlElement::new("t").text(s.as_str());
                // Excel drops leading/trailing whitespace unless told otherwise
                if s.trim() != s.as_str() {
                    t = t.attr("xml:space", "preserve");
                }
                XmlElement::new("si").child(t)
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::create_xml;
    use proptest::prelude::*;

    #[test]
    fn test_shared_strings() {
        let mut ss = SharedStringTable::new();
        let idx1 = ss.position("Hello");
        let idx2 = ss.position("World");
        let idx3 = ss.position("Hello"); // Duplicate

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(idx3, 0);
        assert_eq!(ss.len(), 2);
        assert_eq!(ss.get("World"), Some(1));
        assert_eq!(ss.get("missing"), None);
    }

    #[test]
    fn test_to_element_order_and_whitespace() {
        let mut ss = SharedStringTable::new();
        ss.position("b");
        ss.position(" a ");
        let xml = create_xml(&ss.to_element()).unwrap();

        assert!(xml.contains(r#"count="2" uniqueCount="2""#));
        let b = xml.find("<t>b</t>").unwrap();
        let a = xml.find(r#"<t xml:space="preserve"> a </t>"#).unwrap();
        assert!(b < a);
    }

    proptest! {
        #[test]
        fn prop_positions_are_dense_in_first_seen_order(values in prop::collection::vec("[a-e]{0,3}", 0..40)) {
            let mut ss = SharedStringTable::new();
            let mut first_seen: Vec<String> = Vec::new();

            for value in &values {
                let pos = ss.position(value);
                match first_seen.iter().position(|s| s == value) {
                    Some(expected) => prop_assert_eq!(pos, expected),
                    None => {
                        prop_assert_eq!(pos, first_seen.len());
                        first_seen.push(value.clone());
                    }
                }
            }

            prop_assert_eq!(ss.len(), first_seen.len());
            prop_assert!(ss.iter().eq(first_seen.iter().map(String::as_str)));
        }

        #[test]
        fn prop_repeated_lookups_do_not_grow(values in prop::collection::hash_set("[a-z]{1,6}", 1..20)) {
            let mut ss = SharedStringTable::new();
            let positions: Vec<usize> = values.iter().map(|v| ss.position(v)).collect();
            let size = ss.len();

            for (value, pos) in values.iter().zip(&positions) {
                prop_assert_eq!(ss.position(value), *pos);
            }
            prop_assert_eq!(ss.len(), size);

            let mut sorted = positions.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), values.len());
        }
    }
}
