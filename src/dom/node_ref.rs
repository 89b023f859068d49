//! Read-only node handle used by every classifier.
//!
//! [`NodeRef`] is the only way the rest of the crate looks at the DOM: tag
//! name, attributes, children and flattened text. It is `Copy`, so content
//! items can hold on to the nodes they were built from without cloning
//! anything.

use std::fmt;

use super::arena::{Dom, NodeData, NodeId};

/// Elements whose text is never content.
const NON_CONTENT: &[&str] = &["script", "style", "head", "title", "template"];

/// Borrowed handle to one node of a [`Dom`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    dom: &'a Dom,
    id: NodeId,
}

impl Dom {
    /// Handle to the document node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            dom: self,
            id: self.document(),
        }
    }

    /// Handle to an arbitrary node, if the id is valid.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.get(id).map(|_| NodeRef { dom: self, id })
    }

    /// The `<body>` element, falling back to the document node.
    pub fn body(&self) -> NodeRef<'_> {
        self.root().find("body").unwrap_or_else(|| self.root())
    }
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> Option<&'a NodeData> {
        self.dom.get(self.id).map(|n| &n.data)
    }

    /// Local tag name for elements, `None` for text, comments and the document.
    pub fn tag(&self) -> Option<&'a str> {
        match self.data() {
            Some(NodeData::Element { name, .. }) => Some(name.local.as_ref()),
            _ => None,
        }
    }

    /// True when this is an element with the given tag.
    pub fn is(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data(), Some(NodeData::Element { .. }))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data(), Some(NodeData::Text(_)))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.data(), Some(NodeData::Comment(_)))
    }

    /// Raw value of a text node.
    pub fn text_value(&self) -> Option<&'a str> {
        match self.data() {
            Some(NodeData::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// True for text nodes holding only whitespace.
    pub fn is_blank_text(&self) -> bool {
        self.text_value().is_some_and(|t| t.trim().is_empty())
    }

    /// Attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self.data() {
            Some(NodeData::Element { attrs, .. }) => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// All attributes in source order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let attrs = match self.data() {
            Some(NodeData::Element { attrs, .. }) => attrs.as_slice(),
            _ => &[],
        };
        attrs
            .iter()
            .map(|a| (a.name.local.as_ref(), a.value.as_str()))
    }

    /// Class tokens.
    pub fn classes(&self) -> &'a [String] {
        match self.data() {
            Some(NodeData::Element { classes, .. }) => classes,
            _ => &[],
        }
    }

    /// Exact class token match.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    /// Any class token containing `needle`.
    pub fn class_contains(&self, needle: &str) -> bool {
        self.classes().iter().any(|c| c.contains(needle))
    }

    /// Any class token ending with `suffix`.
    pub fn class_ends_with(&self, suffix: &str) -> bool {
        self.classes().iter().any(|c| c.ends_with(suffix))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let parent = self.dom.get(self.id)?.parent;
        self.dom.node(parent)
    }

    /// Parent, grandparent, and so on up to the document.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), NodeRef::parent)
    }

    /// All children, including text and comments.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let dom = self.dom;
        dom.children(self.id).map(move |id| NodeRef { dom, id })
    }

    /// Element children only.
    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(NodeRef::is_element)
    }

    /// Children that carry meaning: comments and whitespace-only text dropped.
    pub fn contents(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children()
            .filter(|c| !c.is_comment() && !c.is_blank_text())
    }

    /// Like [`contents`](Self::contents), but a table's implicit
    /// `tbody`/`thead`/`tfoot` wrappers are looked through, so a table's
    /// layout children are its rows whether or not the parser inserted a
    /// section element.
    pub fn layout_children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        for child in self.contents() {
            if self.is("table") && matches!(child.tag(), Some("tbody" | "thead" | "tfoot")) {
                out.extend(child.contents());
            } else {
                out.push(child);
            }
        }
        out
    }

    /// Table rows directly owned by this table.
    pub fn rows(&self) -> Vec<NodeRef<'a>> {
        self.layout_children()
            .into_iter()
            .filter(|c| c.is("tr"))
            .collect()
    }

    /// Pre-order walk over every descendant (not including `self`).
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.dom.children(self.id).collect();
        stack.reverse();
        Descendants {
            dom: self.dom,
            stack,
        }
    }

    /// First descendant element with the given tag.
    pub fn find(&self, tag: &str) -> Option<NodeRef<'a>> {
        self.descendants().find(|n| n.is(tag))
    }

    /// Every descendant element with the given tag, in document order.
    pub fn find_all<'t>(&self, tag: &'t str) -> impl Iterator<Item = NodeRef<'a>> + 't
    where
        'a: 't,
    {
        self.descendants().filter(move |n| n.is(tag))
    }

    /// First descendant satisfying `predicate`.
    pub fn find_where<F>(&self, predicate: F) -> Option<NodeRef<'a>>
    where
        F: Fn(&NodeRef<'a>) -> bool,
    {
        self.descendants().find(|n| predicate(n))
    }

    /// Raw text of every descendant text node in document order, skipping
    /// scripts, styles and comments.
    pub fn text_segments(&self) -> Vec<&'a str> {
        if let Some(text) = self.text_value() {
            return vec![text];
        }

        let mut out = Vec::new();
        let mut stack: Vec<NodeRef<'a>> = self.children().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            if let Some(text) = node.text_value() {
                out.push(text);
                continue;
            }
            if node.tag().is_some_and(|t| NON_CONTENT.contains(&t)) {
                continue;
            }
            let start = stack.len();
            stack.extend(node.children());
            stack[start..].reverse();
        }
        out
    }

    /// Concatenated raw text of the subtree.
    pub fn text(&self) -> String {
        self.text_segments().concat()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dom, other.dom) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            Some(NodeData::Element { .. }) => {
                write!(f, "<{}>#{}", self.tag().unwrap_or_default(), self.id.0)
            }
            Some(NodeData::Text(t)) => write!(f, "{:?}#{}", t, self.id.0),
            Some(NodeData::Comment(_)) => write!(f, "<!--->#{}", self.id.0),
            Some(NodeData::Document) => write!(f, "#document"),
            Some(NodeData::Doctype) => write!(f, "<!DOCTYPE>"),
            None => write!(f, "#invalid"),
        }
    }
}

/// Pre-order descendant iterator backed by an explicit stack.
pub struct Descendants<'a> {
    dom: &'a Dom,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.dom.children(id));
        self.stack[start..].reverse();
        Some(NodeRef { dom: self.dom, id })
    }
}
