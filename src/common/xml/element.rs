//! In-memory XML element tree used by every part template.
//!
//! Templates describe a part as a tree of [`XmlElement`] values which is then
//! serialized in one pass by [`super::writer`]. Attribute and text values are
//! stored unescaped; escaping happens during serialization.

/// A single XML element with ordered attributes, optional text content and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified element name, including its prefix (e.g. `xdr:pic`)
    pub name: String,
    /// Attributes in emission order
    pub attributes: Vec<(String, String)>,
    /// Text content written before any children
    pub text: Option<String>,
    /// Child elements in emission order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element without attributes or content.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Add an attribute only when `value` is present.
    pub fn attr_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Add `key="1"` when `flag` is set.
    pub fn flag(self, key: impl Into<String>, flag: bool) -> Self {
        if flag { self.attr(key, "1") } else { self }
    }

    /// Set the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child element when present.
    pub fn child_opt(mut self, child: Option<XmlElement>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    /// Append several child elements.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = XmlElement>,
    {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Find the first direct child with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterate over direct children with the given name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Whether the element serializes as a self-closing tag.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }
}

/// Wrap `children` in a collection element carrying a `count` attribute.
///
/// Several SpreadsheetML collections (`fonts`, `cellXfs`, `mergeCells`, ...)
/// repeat their child count as an attribute.
pub fn counted(name: &str, children: Vec<XmlElement>) -> XmlElement {
    XmlElement::new(name)
        .attr("count", children.len())
        .children(children)
}
