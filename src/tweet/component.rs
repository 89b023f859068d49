//! Roles of the top-level pieces of an embedded tweet.

use crate::dom::NodeRef;
use crate::text::{is_blank, is_tweet_shaped};

const AVATAR_ALT_PREFIX: &str = "Twitter avatar for";

/// Tags read as tweet text when nothing more specific matched.
const TEXT_TAGS: &[&str] = &[
    "p", "div", "span", "em", "strong", "b", "i", "br", "td", "tr", "blockquote",
];

/// One classified piece of a tweet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweetComponent<'a> {
    /// Avatar, display name and handle of the author.
    Header(NodeRef<'a>),
    /// Timestamp plus retweet and like counters.
    Footer(NodeRef<'a>),
    /// Link preview card.
    Embed(NodeRef<'a>),
    Link(NodeRef<'a>),
    /// Mention or hashtag rendered as a styled span.
    FakeLink(NodeRef<'a>),
    Text(NodeRef<'a>),
    Image(NodeRef<'a>),
    /// Author line of the tweet being quoted.
    RetweetHeader(NodeRef<'a>),
    Null(NodeRef<'a>),
}

impl<'a> TweetComponent<'a> {
    /// Classify one node; first matching role wins.
    pub fn classify(node: NodeRef<'a>) -> Self {
        if is_footer(node) {
            TweetComponent::Footer(node)
        } else if is_embed(node) {
            TweetComponent::Embed(node)
        } else if is_header(node) {
            TweetComponent::Header(node)
        } else if is_image(node) {
            TweetComponent::Image(node)
        } else if node.is("a") {
            TweetComponent::Link(node)
        } else if node.is("span") && node.class_contains("fake-link") {
            TweetComponent::FakeLink(node)
        } else if is_text(node) {
            TweetComponent::Text(node)
        } else if is_retweet_header(node) {
            TweetComponent::RetweetHeader(node)
        } else {
            TweetComponent::Null(node)
        }
    }

    pub fn node(&self) -> NodeRef<'a> {
        match *self {
            TweetComponent::Header(n)
            | TweetComponent::Footer(n)
            | TweetComponent::Embed(n)
            | TweetComponent::Link(n)
            | TweetComponent::FakeLink(n)
            | TweetComponent::Text(n)
            | TweetComponent::Image(n)
            | TweetComponent::RetweetHeader(n)
            | TweetComponent::Null(n) => n,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TweetComponent::Null(_))
    }
}

/// Split a tweet node into its components, unwrapping header anchors and
/// quoted-tweet bodies, with `Null` pieces dropped.
pub fn components(tweet: NodeRef<'_>) -> Vec<TweetComponent<'_>> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeRef<'_>> = tweet.layout_children();
    stack.reverse();
    while let Some(node) = stack.pop() {
        if is_header_anchor(node) || is_retweet_body(node) {
            let start = stack.len();
            stack.extend(node.layout_children());
            stack[start..].reverse();
            continue;
        }
        let component = TweetComponent::classify(node);
        if !component.is_null() {
            out.push(component);
        }
    }
    out
}

/// Descend through single-child layout wrappers (mail relays wrap tweets in
/// one-cell tables) to the node whose children are the components.
pub fn component_root(tweet: NodeRef<'_>) -> NodeRef<'_> {
    let mut node = tweet;
    loop {
        let children = node.layout_children();
        match children.as_slice() {
            [only] if matches!(only.tag(), Some("table" | "tr" | "td" | "div" | "center")) => {
                node = *only;
            }
            _ => return node,
        }
    }
}

fn is_avatar(node: NodeRef<'_>) -> bool {
    node.is("img")
        && node
            .attr("alt")
            .is_some_and(|alt| alt.starts_with(AVATAR_ALT_PREFIX))
}

/// True when `node` or a descendant is a tweet avatar image.
pub(crate) fn has_avatar(node: NodeRef<'_>) -> bool {
    is_avatar(node) || node.find_where(|n| is_avatar(*n)).is_some()
}

/// Handle named by an avatar's alt text, e.g. `@jack`.
pub(crate) fn avatar_handle(node: NodeRef<'_>) -> Option<String> {
    let avatar = if is_avatar(node) {
        Some(node)
    } else {
        node.find_where(|n| is_avatar(*n))
    };
    avatar
        .and_then(|img| img.attr("alt"))
        .and_then(|alt| alt.strip_prefix(AVATAR_ALT_PREFIX))
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .map(str::to_string)
}

fn self_or_descendant(node: NodeRef<'_>, predicate: impl Fn(NodeRef<'_>) -> bool) -> bool {
    predicate(node) || node.descendants().any(|n| predicate(n))
}

fn is_footer(node: NodeRef<'_>) -> bool {
    node.is_element()
        && (self_or_descendant(node, |n| n.class_contains("tweet-footer")) || is_tweet_shaped(node))
}

fn is_embed(node: NodeRef<'_>) -> bool {
    if node.class_contains("expanded-link") {
        return true;
    }
    node.is("a") && node.find("img").is_some() && !is_blank(node) && !has_avatar(node)
}

fn is_header(node: NodeRef<'_>) -> bool {
    node.is_element()
        && (self_or_descendant(node, |n| n.class_contains("tweet-header")) || has_avatar(node))
}

fn is_image(node: NodeRef<'_>) -> bool {
    if node.is("img") || node.class_contains("tweet-photo") {
        return true;
    }
    if !(node.is("a") || node.is("div")) {
        return false;
    }
    let mut children = node.element_children().peekable();
    children.peek().is_some() && children.all(|c| c.is("img"))
}

fn is_text(node: NodeRef<'_>) -> bool {
    if is_retweet_header(node) {
        return false;
    }
    if node.is_text() {
        return !node.is_blank_text();
    }
    node.class_contains("tweet-text") || node.tag().is_some_and(|t| TEXT_TAGS.contains(&t))
}

/// `<p><span>Name</span><span>@handle</span></p>`: spans only, one of them a
/// handle, none of them a styled mention.
pub(crate) fn is_retweet_header(node: NodeRef<'_>) -> bool {
    if !(node.is("p") || node.is("div")) {
        return false;
    }
    let spans: Vec<_> = node.element_children().collect();
    !spans.is_empty()
        && spans
            .iter()
            .all(|s| s.is("span") && !s.class_contains("fake-link"))
        && spans.iter().any(|s| s.text().trim_start().starts_with('@'))
}

/// An anchor wrapping the header together with the rest of the tweet body.
fn is_header_anchor(node: NodeRef<'_>) -> bool {
    node.is("a")
        && node
            .element_children()
            .any(|c| c.is("div") && is_header(c))
        && node.element_children().count() > 1
}

/// A quoted tweet's body: a div whose first paragraph is its author line.
fn is_retweet_body(node: NodeRef<'_>) -> bool {
    node.is("div")
        && node
            .element_children()
            .find(|c| c.is("p"))
            .is_some_and(is_retweet_header)
}
