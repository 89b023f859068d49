//! Fallback emitter for mail from unknown platforms.
//!
//! Walks the whole `<body>`, opening layout containers and lists, and trims
//! the two kinds of noise every kind of mail can carry: a forwarded-message
//! banner at the top and the legal footer after the copyright line.

use crate::content::{ContentItem, Context, Variant};
use crate::dom::NodeRef;
use crate::text::normalize;

/// Elements that only arrange other content on the page.
const LAYOUT_CONTAINERS: &[&str] = &[
    "body", "div", "table", "tbody", "thead", "tfoot", "tr", "td", "th", "center", "section",
    "article", "main", "header", "footer", "aside", "nav", "font", "form",
];

/// Lines a forward banner carries after its opening line (From, Date,
/// Subject, To) when each one lands in its own block.
const FORWARD_BANNER_LINES: usize = 4;

/// Progress through a leading forwarded-message banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Banner {
    /// No text seen yet.
    Pending,
    /// Inside the banner, with this many header lines still allowed.
    Open(usize),
    Closed,
}

/// Depth-first walk over arbitrary mail HTML.
///
/// Unmatched layout containers are opened up and their children classified
/// in turn; every other node is yielded as classified. The walk ends at the
/// first paragraph starting with "Copyright", which in practice opens the
/// legal footer. A "Forwarded message" banner ahead of any other text is
/// dropped up to and including its `To:` line.
pub struct GenericWalk<'a> {
    ctx: &'a Context<'a>,
    stack: Vec<NodeRef<'a>>,
    banner: Banner,
}

impl<'a> GenericWalk<'a> {
    pub fn new(root: NodeRef<'a>, ctx: &'a Context<'a>) -> Self {
        let start = if root.is("body") {
            root
        } else {
            root.find("body").unwrap_or(root)
        };
        let mut stack: Vec<_> = start.contents().collect();
        stack.reverse();
        Self {
            ctx,
            stack,
            banner: Banner::Pending,
        }
    }

    fn push_children(&mut self, node: NodeRef<'a>) {
        let start = self.stack.len();
        self.stack.extend(node.contents());
        self.stack[start..].reverse();
    }

    fn push_list_entries(&mut self, list: NodeRef<'a>) {
        let start = self.stack.len();
        self.stack.extend(list.element_children().filter(|c| c.is("li")));
        self.stack[start..].reverse();
    }

    /// True when `node` belongs to a leading forward banner and must be dropped.
    fn in_banner(&mut self, node: NodeRef<'a>) -> bool {
        match self.banner {
            Banner::Closed => false,
            Banner::Pending => {
                let text = normalize(node).to_lowercase();
                if text.is_empty() {
                    return false;
                }
                if !text.contains("forwarded message") {
                    self.banner = Banner::Closed;
                    return false;
                }
                log::debug!("dropping forwarded message banner");
                self.banner = if has_to_line(node) {
                    Banner::Closed
                } else {
                    Banner::Open(FORWARD_BANNER_LINES)
                };
                true
            }
            Banner::Open(remaining) => {
                self.banner = if has_to_line(node) || remaining <= 1 {
                    Banner::Closed
                } else {
                    Banner::Open(remaining - 1)
                };
                true
            }
        }
    }
}

/// True when any text line of the subtree starts with `To:`.
fn has_to_line(node: NodeRef<'_>) -> bool {
    node.text_segments()
        .iter()
        .any(|s| s.trim_start().to_ascii_lowercase().starts_with("to:"))
}

fn is_copyright(item: &ContentItem<'_>) -> bool {
    matches!(item.variant(), Variant::Paragraph)
        && normalize(item.node()).to_lowercase().starts_with("copyright")
}

impl<'a> Iterator for GenericWalk<'a> {
    type Item = ContentItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is("ul") || node.is("ol") {
                self.push_list_entries(node);
                continue;
            }
            let item = self.ctx.classify(node);
            if item.is_unmatched() && node.tag().is_some_and(|t| LAYOUT_CONTAINERS.contains(&t)) {
                self.push_children(node);
                continue;
            }
            if self.in_banner(node) {
                continue;
            }
            if is_copyright(&item) {
                log::debug!("copyright notice reached, dropping the rest");
                self.stack.clear();
                return None;
            }
            return Some(item);
        }
        None
    }
}
