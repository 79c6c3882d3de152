//! The arena-backed element tree.

use std::fmt;

/// Handle to an element inside a [`Document`].
///
/// Handles are only meaningful for the document that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Namespace-qualified name of an element or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    pub namespace: Option<String>,
    pub local: String,
}

impl Name {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// A name in no namespace.
    pub fn unqualified(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// Returns `true` if this name has the given namespace and local part.
    pub fn is(&self, namespace: Option<&str>, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == namespace
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub value: String,
}

/// An element node: name, attributes, ordered children and text content.
///
/// Text is the concatenation of all character data directly inside the
/// element, trimmed. Elements with children normally have no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: Name,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    pub text: String,
}

impl Element {
    fn new(name: Name) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Value of the attribute with the given namespace and local name.
    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(namespace, local))
            .map(|a| a.value.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_empty()
    }
}

/// An XML document held as an arena of elements.
///
/// Elements are created detached and attached with [`Document::append`] or
/// [`Document::set_root`]. The arena never shrinks, so a [`NodeId`] stays
/// valid for the life of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Element>,
    root: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, name: Name) -> NodeId {
        self.nodes.push(Element::new(name));
        NodeId(self.nodes.len() - 1)
    }

    /// Creates an element and appends it to `parent`.
    pub fn append(&mut self, parent: NodeId, name: Name) -> NodeId {
        let child = self.create_element(name);
        self.nodes[parent.0].children.push(child);
        child
    }

    /// Appends an existing detached element to `parent`.
    pub fn append_existing(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Detaches the last child of `parent` if it is `child`.
    ///
    /// Used to retract an element that turned out to have nothing to say.
    pub fn retract(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.nodes[parent.0].children;
        if children.last() == Some(&child) {
            children.pop();
            true
        } else {
            false
        }
    }

    pub fn set_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Sets an attribute, replacing any previous value under the same name.
    pub fn set_attribute(&mut self, node: NodeId, name: Name, value: impl Into<String>) {
        let value = value.into();
        let element = &mut self.nodes[node.0];
        match element.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => element.attributes.push(Attribute { name, value }),
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.0].text = text.into();
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.0]
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[node.0].children.iter().copied()
    }

    /// `node` and every element below it, in document order.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: vec![node],
        }
    }

    /// Number of elements in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Depth-first iterator over a subtree, see [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.document.element(node).children.iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree() {
        let mut doc = Document::new();
        let root = doc.create_element(Name::new("urn:a", "root"));
        doc.set_root(root);
        let first = doc.append(root, Name::new("urn:a", "first"));
        let second = doc.append(root, Name::unqualified("second"));
        doc.set_attribute(first, Name::unqualified("id"), "x");
        doc.set_attribute(first, Name::unqualified("id"), "y");
        doc.set_text(second, "text");

        assert_eq!(doc.element(first).attribute(None, "id"), Some("y"));
        assert_eq!(doc.element(first).attributes.len(), 1);
        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(doc.descendants(root).collect::<Vec<_>>(), vec![root, first, second]);
    }

    #[test]
    fn test_retract_last_child_only() {
        let mut doc = Document::new();
        let root = doc.create_element(Name::unqualified("root"));
        let a = doc.append(root, Name::unqualified("a"));
        let b = doc.append(root, Name::unqualified("b"));
        assert!(!doc.retract(root, a));
        assert!(doc.retract(root, b));
        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_name_display() {
        assert_eq!(Name::new("urn:x", "a").to_string(), "{urn:x}a");
        assert_eq!(Name::unqualified("a").to_string(), "a");
    }
}
