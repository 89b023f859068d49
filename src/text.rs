//! Text sanitizing for speech and classification.
//!
//! Speech engines read typographic punctuation inconsistently, so every
//! piece of text is flattened to plain ASCII punctuation with collapsed
//! whitespace before it reaches an SSML tree.

use crate::dom::NodeRef;
use crate::patterns::{LIKES_RE, RETWEETS_RE};

/// Typographic characters and their plain replacements.
const PUNCTUATION: &[(char, &str)] = &[
    ('\u{2014}', "-"),   // em dash
    ('\u{2013}', "-"),   // en dash
    ('\u{00A0}', " "),   // no-break space
    ('\u{201D}', "\""),  // right double quote
    ('\u{201C}', "\""),  // left double quote
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{2026}', "..."), // ellipsis
];

/// Normalize a raw string: plain punctuation, no line breaks, single spaces.
pub fn normalize_str(raw: &str) -> String {
    let mut replaced = String::with_capacity(raw.len());
    for c in raw.chars() {
        match PUNCTUATION.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => replaced.push_str(to),
            None if c == '\n' || c == '\r' => replaced.push(' '),
            None => replaced.push(c),
        }
    }
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of a node's subtree.
///
/// Each text segment is trimmed and the non-empty ones are joined with a
/// single space, so inline markup boundaries never glue words together.
pub fn normalize(node: NodeRef<'_>) -> String {
    let joined = node
        .text_segments()
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_str(&joined)
}

/// Subtree text with every segment trimmed and concatenated without separators.
fn compact_text(node: NodeRef<'_>) -> String {
    node.text_segments().into_iter().map(str::trim).collect()
}

/// True when the node holds exactly one link and nothing but that link's text.
pub fn is_only_link(node: NodeRef<'_>) -> bool {
    let mut links = node.find_all("a");
    let (Some(link), None) = (links.next(), links.next()) else {
        return false;
    };
    compact_text(link) == compact_text(node)
}

/// True when the subtree carries tweet footer counters ("N Retweets", "N Likes").
pub fn is_tweet_shaped(node: NodeRef<'_>) -> bool {
    let mut retweets = false;
    let mut likes = false;
    for span in node.find_all("span") {
        let text = span.text();
        retweets |= RETWEETS_RE.is_match(&text);
        likes |= LIKES_RE.is_match(&text);
        if retweets && likes {
            return true;
        }
    }
    false
}

/// True when the subtree has no visible text.
pub fn is_blank(node: NodeRef<'_>) -> bool {
    node.text_segments().iter().all(|s| s.trim().is_empty())
}
