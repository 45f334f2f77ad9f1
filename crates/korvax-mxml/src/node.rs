//! In-memory markup element tree.

/// One element in a property markup document.
///
/// The dialect only ever uses a handful of attributes (`name`, `value`,
/// `template`, `linked`, `_id`, `_index`) and carries no text content, so a
/// node is just a tag, an ordered attribute list, and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct MxmlNode {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes as key-value pairs, in document order.
    pub attrs: Vec<(String, String)>,
    /// Child elements, in document order.
    pub children: Vec<MxmlNode>,
}

impl MxmlNode {
    /// Create a new node with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute to this node.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Add a child node.
    pub fn child(mut self, child: MxmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this node has any child elements.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
