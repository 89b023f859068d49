//! Immutable SSML tree.

use std::fmt::{self, Write};

use crate::util::{escape_attr, escape_text};

/// Elements whose text is already annotated and must not be rewritten again.
const OPAQUE_ELEMENTS: &[&str] = &["phoneme", "sub"];

/// A node of an SSML document.
///
/// Trees are never mutated after construction; [`replace_text`] builds a
/// new tree, so the same tree can be measured and serialized any number of
/// times with identical output.
///
/// [`replace_text`]: SsmlNode::replace_text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsmlNode {
    /// Character data, escaped on output.
    Text(String),
    /// A tagged element.
    Element(Element),
    /// A sequence serialized back to back with no wrapper.
    Array(Vec<SsmlNode>),
}

/// A tagged SSML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<SsmlNode>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Add an attribute only when a value is present.
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Replace the element's children.
    pub fn children(mut self, children: Vec<SsmlNode>) -> Self {
        self.children = children;
        self
    }
}

impl From<Element> for SsmlNode {
    fn from(element: Element) -> Self {
        SsmlNode::Element(element)
    }
}

impl SsmlNode {
    /// True when this node is an element with the given tag name.
    pub fn is_tag(&self, name: &str) -> bool {
        matches!(self, SsmlNode::Element(e) if e.name == name)
    }

    /// True when serializing this node produces no output.
    pub fn is_empty(&self) -> bool {
        match self {
            SsmlNode::Text(t) => t.is_empty(),
            SsmlNode::Element(_) => false,
            SsmlNode::Array(items) => items.iter().all(SsmlNode::is_empty),
        }
    }

    /// Length in bytes of the serialized form, computed without allocating it.
    pub fn serialized_len(&self) -> usize {
        let mut counter = LenCounter(0);
        // LenCounter never fails.
        let _ = write!(counter, "{self}");
        counter.0
    }

    /// Return a new tree with every occurrence of `needle` in text leaves
    /// replaced by the node `replacer` builds from the matched text.
    ///
    /// With `ignore_case`, ASCII letters match regardless of case and the
    /// replacer receives the text as written in the source. Text inside
    /// `phoneme` and `sub` elements is left alone.
    pub fn replace_text(
        &self,
        needle: &str,
        replacer: &dyn Fn(&str) -> SsmlNode,
        ignore_case: bool,
    ) -> SsmlNode {
        match self {
            SsmlNode::Text(text) => replace_in_text(text, needle, replacer, ignore_case),
            SsmlNode::Element(e) if OPAQUE_ELEMENTS.contains(&e.name) => self.clone(),
            SsmlNode::Element(e) => SsmlNode::Element(Element {
                name: e.name,
                attrs: e.attrs.clone(),
                children: e
                    .children
                    .iter()
                    .map(|c| c.replace_text(needle, replacer, ignore_case))
                    .collect(),
            }),
            SsmlNode::Array(items) => SsmlNode::Array(
                items
                    .iter()
                    .map(|c| c.replace_text(needle, replacer, ignore_case))
                    .collect(),
            ),
        }
    }
}

fn replace_in_text(
    text: &str,
    needle: &str,
    replacer: &dyn Fn(&str) -> SsmlNode,
    ignore_case: bool,
) -> SsmlNode {
    if needle.is_empty() {
        return SsmlNode::Text(text.to_string());
    }

    // ASCII case folding keeps byte offsets identical between the folded
    // and original strings.
    let (haystack, needle) = if ignore_case {
        (text.to_ascii_lowercase(), needle.to_ascii_lowercase())
    } else {
        (text.to_string(), needle.to_string())
    };

    let mut parts = Vec::new();
    let mut last = 0;
    for (start, matched) in haystack.match_indices(needle.as_str()) {
        if start > last {
            parts.push(SsmlNode::Text(text[last..start].to_string()));
        }
        let end = start + matched.len();
        parts.push(replacer(&text[start..end]));
        last = end;
    }

    if parts.is_empty() {
        return SsmlNode::Text(text.to_string());
    }
    if last < text.len() {
        parts.push(SsmlNode::Text(text[last..].to_string()));
    }
    SsmlNode::Array(parts)
}

impl fmt::Display for SsmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SsmlNode::Text(text) => f.write_str(&escape_text(text)),
            SsmlNode::Array(items) => items.iter().try_for_each(|item| write!(f, "{item}")),
            SsmlNode::Element(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape_attr(value))?;
        }
        if self.children.is_empty() {
            return f.write_str(" />");
        }
        f.write_char('>')?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

struct LenCounter(usize);

impl fmt::Write for LenCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SsmlNode {
        SsmlNode::Text(s.to_string())
    }

    fn phoneme(surface: &str) -> SsmlNode {
        Element::new("phoneme")
            .attr("alphabet", "ipa")
            .attr("ph", "x")
            .children(vec![text(surface)])
            .into()
    }

    #[test]
    fn test_display_nested() {
        let node: SsmlNode = Element::new("p")
            .children(vec![Element::new("s").children(vec![text("Hi & bye")]).into()])
            .into();
        assert_eq!(node.to_string(), "<p><s>Hi &amp; bye</s></p>");
    }

    #[test]
    fn test_display_empty_element() {
        let node: SsmlNode = Element::new("break").attr("time", "750ms").into();
        assert_eq!(node.to_string(), r#"<break time="750ms" />"#);
    }

    #[test]
    fn test_serialized_len_matches_display() {
        let node: SsmlNode = Element::new("speak")
            .children(vec![text("a < b"), Element::new("break").attr("time", "1s").into()])
            .into();
        assert_eq!(node.serialized_len(), node.to_string().len());
    }

    #[test]
    fn test_replace_text_case_sensitive() {
        let original = text("Substack and substack");
        let replaced = original.replace_text("Substack", &phoneme, false);
        assert_eq!(
            replaced.to_string(),
            r#"<phoneme alphabet="ipa" ph="x">Substack</phoneme> and substack"#
        );
        // Original is untouched.
        assert_eq!(original, text("Substack and substack"));
    }

    #[test]
    fn test_replace_text_ignore_case_keeps_surface() {
        let replaced = text("SUBSTACK, substack").replace_text("Substack", &phoneme, true);
        assert_eq!(
            replaced.to_string(),
            r#"<phoneme alphabet="ipa" ph="x">SUBSTACK</phoneme>, <phoneme alphabet="ipa" ph="x">substack</phoneme>"#
        );
    }

    #[test]
    fn test_replace_text_no_match_is_identity() {
        let node: SsmlNode = Element::new("p").children(vec![text("nothing here")]).into();
        assert_eq!(node.replace_text("zzz", &phoneme, true), node);
    }

    #[test]
    fn test_replace_text_skips_phoneme() {
        let node = SsmlNode::Array(vec![phoneme("GIF"), text(" GIF")]);
        let replaced = node.replace_text("GIF", &phoneme, false);
        assert_eq!(
            replaced.to_string(),
            r#"<phoneme alphabet="ipa" ph="x">GIF</phoneme> <phoneme alphabet="ipa" ph="x">GIF</phoneme>"#
        );
    }

    #[test]
    fn test_replace_text_multibyte() {
        let replaced = text("café SaaS über").replace_text("saas", &phoneme, true);
        assert_eq!(
            replaced.to_string(),
            r#"café <phoneme alphabet="ipa" ph="x">SaaS</phoneme> über"#
        );
    }
}
