//! Description fragments.
//!
//! A description is the human-readable companion of the speech: a list of
//! small HTML snippets. Each fragment carries a [`ContentKind`] so that the
//! orchestrator can evict whole kinds when the description is over budget.

use std::fmt;

use serde::Serialize;

use crate::dom::NodeRef;

/// Coarse category of a description fragment, used only for eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Embed,
    Utility,
    Null,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Text,
        ContentKind::Image,
        ContentKind::Embed,
        ContentKind::Utility,
        ContentKind::Null,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Embed => "embed",
            ContentKind::Utility => "utility",
            ContentKind::Null => "null",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a fragment renders.
#[derive(Debug, Clone)]
pub enum Payload<'a> {
    /// A DOM subtree, serialized through the attribute allow-list.
    Node(NodeRef<'a>),
    /// Markup built by the crate, emitted verbatim.
    Markup(String),
}

/// One description fragment.
#[derive(Debug, Clone)]
pub struct DescriptionItem<'a> {
    kind: ContentKind,
    payload: Payload<'a>,
}

impl<'a> DescriptionItem<'a> {
    pub fn new(kind: ContentKind, payload: Payload<'a>) -> Self {
        Self { kind, payload }
    }

    pub fn text(node: NodeRef<'a>) -> Self {
        Self::new(ContentKind::Text, Payload::Node(node))
    }

    pub fn text_markup(markup: impl Into<String>) -> Self {
        Self::new(ContentKind::Text, Payload::Markup(markup.into()))
    }

    pub fn image(node: NodeRef<'a>) -> Self {
        Self::new(ContentKind::Image, Payload::Node(node))
    }

    pub fn embed(node: NodeRef<'a>) -> Self {
        Self::new(ContentKind::Embed, Payload::Node(node))
    }

    pub fn utility(node: NodeRef<'a>) -> Self {
        Self::new(ContentKind::Utility, Payload::Node(node))
    }

    pub fn utility_markup(markup: impl Into<String>) -> Self {
        Self::new(ContentKind::Utility, Payload::Markup(markup.into()))
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Serialize the fragment, dropping `href` attributes when `strip_links` is set.
    pub fn render(&self, strip_links: bool) -> String {
        match &self.payload {
            Payload::Node(node) => node.to_filtered_html(strip_links),
            Payload::Markup(markup) => markup.clone(),
        }
    }
}
