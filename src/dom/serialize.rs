//! Allow-list HTML serialization for description fragments.
//!
//! The source tree is never modified; attributes are filtered while writing.

use super::node_ref::NodeRef;
use crate::util::{escape_attr, escape_text};

/// Attributes kept on serialized elements.
pub const ALLOWED_ATTRIBUTES: &[&str] = &["alt", "src", "href"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const DROPPED_ELEMENTS: &[&str] = &["script", "style", "template"];

enum Step<'a> {
    Enter(NodeRef<'a>),
    Close(&'a str),
}

/// Serialize `node` and its subtree into `out`.
///
/// Only [`ALLOWED_ATTRIBUTES`] survive, and `href` is dropped as well when
/// `strip_links` is set. Comments, scripts and styles are omitted.
pub fn write_filtered(node: NodeRef<'_>, strip_links: bool, out: &mut String) {
    let mut stack = vec![Step::Enter(node)];

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                continue;
            }
            Step::Enter(node) => node,
        };

        if let Some(text) = node.text_value() {
            out.push_str(&escape_text(text));
            continue;
        }

        let Some(tag) = node.tag() else {
            // Document node: serialize its children only.
            if !node.is_comment() {
                push_children(node, &mut stack);
            }
            continue;
        };

        if DROPPED_ELEMENTS.contains(&tag) {
            continue;
        }

        out.push('<');
        out.push_str(tag);
        for (name, value) in node.attrs() {
            if !ALLOWED_ATTRIBUTES.contains(&name) || (strip_links && name == "href") {
                continue;
            }
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        if VOID_ELEMENTS.contains(&tag) {
            out.push_str("/>");
            continue;
        }

        out.push('>');
        stack.push(Step::Close(tag));
        push_children(node, &mut stack);
    }
}

fn push_children<'a>(node: NodeRef<'a>, stack: &mut Vec<Step<'a>>) {
    let start = stack.len();
    stack.extend(node.children().map(Step::Enter));
    stack[start..].reverse();
}

impl NodeRef<'_> {
    /// Allow-list serialization of this subtree.
    pub fn to_filtered_html(&self, strip_links: bool) -> String {
        let mut out = String::new();
        write_filtered(*self, strip_links, &mut out);
        out
    }
}
