//! Rules for plain HTML, shared by every template family.

use super::{Context, Rule, SkipReason, Variant};
use crate::dom::NodeRef;
use crate::text::{is_blank, normalize};

/// Tags that never hold a paragraph of their own.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "table", "tr", "td", "ul", "ol", "li", "blockquote", "h1", "h2", "h3", "h4", "h5",
    "h6", "img", "hr", "figure", "section", "article",
];

/// Elements whose text is read as one paragraph when they hold no block content.
const TEXT_CONTAINERS: &[&str] = &["div", "td", "th", "span", "font", "center", "section"];

/// Lines mailing-list software injects above the content.
const BOILERPLATE: &[&str] = &["view this email in your browser", "view in browser"];

pub const RULES: &[Rule] = &[
    Rule {
        name: "generic.Boilerplate",
        matches: is_boilerplate,
        build: boilerplate,
    },
    Rule {
        name: "generic.Blockquote",
        matches: is_blockquote,
        build: blockquote,
    },
    Rule {
        name: "generic.List",
        matches: is_list,
        build: list,
    },
    Rule {
        name: "generic.ListEntry",
        matches: is_list_entry,
        build: list_entry,
    },
    Rule {
        name: "generic.Header",
        matches: is_header,
        build: header,
    },
    Rule {
        name: "generic.EmptyParagraph",
        matches: is_empty_paragraph,
        build: empty,
    },
    Rule {
        name: "generic.Paragraph",
        matches: is_paragraph,
        build: paragraph,
    },
    Rule {
        name: "generic.Null",
        matches: |_| true,
        build: unmatched,
    },
];

fn is_boilerplate(node: NodeRef<'_>) -> bool {
    if node.is_comment() {
        return false;
    }
    let text = normalize(node).to_lowercase();
    BOILERPLATE.contains(&text.as_str())
}

fn boilerplate<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::Boilerplate)
}

fn is_blockquote(node: NodeRef<'_>) -> bool {
    node.is("blockquote")
}

fn blockquote<'a>(node: NodeRef<'a>, ctx: &Context<'a>) -> Variant<'a> {
    let children = node.contents().map(|child| ctx.classify(child)).collect();
    Variant::Blockquote { children }
}

fn is_list(node: NodeRef<'_>) -> bool {
    node.is("ul") || node.is("ol")
}

fn list<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::List
}

fn is_list_entry(node: NodeRef<'_>) -> bool {
    node.is("li")
}

fn list_entry<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::ListEntry
}

fn header_level(node: NodeRef<'_>) -> Option<u8> {
    match node.tag()? {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn is_header(node: NodeRef<'_>) -> bool {
    header_level(node).is_some()
}

fn header<'a>(node: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Header {
        level: header_level(node).unwrap_or(6),
    }
}

fn is_empty_paragraph(node: NodeRef<'_>) -> bool {
    node.is("p") && is_blank(node)
}

fn empty<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::Empty)
}

/// A `<p>`, a bare text run, or a text-only container such as
/// `<td>Hello <b>there</b></td>`.
fn is_paragraph(node: NodeRef<'_>) -> bool {
    if node.is("p") {
        return true;
    }
    if node.is_text() {
        return !is_blank(node);
    }
    match node.tag() {
        Some(tag) if TEXT_CONTAINERS.contains(&tag) => {
            !is_blank(node)
                && !node
                    .descendants()
                    .any(|d| d.tag().is_some_and(|t| BLOCK_TAGS.contains(&t)))
        }
        _ => false,
    }
}

fn paragraph<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Paragraph
}

fn unmatched<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::Unmatched)
}
