//! Rules for TechCrunch newsletters.
//!
//! TechCrunch lays everything out in nested tables. The emitter sorts whole
//! tables first (see [`crate::emitter::techcrunch`]); these rules classify
//! the cells of the tables that survive.

use super::{ContentItem, Context, Rule, SkipReason, Variant, starts_with_image};
use crate::dom::NodeRef;
use crate::text::{is_only_link, normalize};

/// Bullet separating the author and date in the header byline. Some relays
/// re-encode the UTF-8 bullet as Windows-1252, hence the second form.
pub const TITLE_SEPARATORS: &[&str] = &["\u{2022}", "\u{e2}\u{20ac}\u{a2}"];

pub const RULES: &[Rule] = &[
    Rule {
        name: "techcrunch.ContentImage",
        matches: is_content_image,
        build: single_image,
    },
    Rule {
        name: "techcrunch.CtaButton",
        matches: is_cta_button,
        build: read_more,
    },
    Rule {
        name: "techcrunch.Tweet",
        matches: is_tweet_embed,
        build: tweet_embed,
    },
    Rule {
        name: "techcrunch.Image",
        matches: is_image,
        build: single_image,
    },
];

fn is_content_image(node: NodeRef<'_>) -> bool {
    node.is("td") && starts_with_image(node)
}

fn single_image<'a>(node: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Image {
        image: node.find("img"),
        caption: None,
    }
}

fn is_cta_button(node: NodeRef<'_>) -> bool {
    if !node.is("p") {
        return false;
    }
    let mut contents = node.contents();
    let (Some(link), None) = (contents.next(), contents.next()) else {
        return false;
    };
    link.is("a") && node.text().to_lowercase().contains("read more") && is_only_link(node)
}

fn read_more<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::ReadMore)
}

fn is_twitter_blockquote(node: NodeRef<'_>) -> bool {
    node.is("blockquote") && node.class_ends_with("twitter-tweet")
}

fn is_tweet_embed(node: NodeRef<'_>) -> bool {
    is_twitter_blockquote(node) || node.find_where(|n| is_twitter_blockquote(*n)).is_some()
}

fn tweet_embed<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::TweetEmbed
}

fn is_image(node: NodeRef<'_>) -> bool {
    node.is("div") && starts_with_image(node)
}

/// Rewrite byline bullets into semicolons: `Jane Doe • 3 min` → `Jane Doe; 3 min`.
pub fn rewrite_byline(byline: &str) -> String {
    let mut text = byline.to_string();
    for separator in TITLE_SEPARATORS {
        text = text.replace(separator, "\u{0}");
    }
    text.split('\u{0}')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build the header item for a three-row header table: logo, title, byline.
pub fn document_header<'a>(table: NodeRef<'a>, ctx: &Context<'a>) -> ContentItem<'a> {
    let rows = table.rows();
    let logo = rows.first().and_then(|row| row.find("img"));
    let title = rows
        .get(1)
        .map(|row| normalize(*row))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| ctx.document().title.clone());
    let byline = rows
        .get(2)
        .and_then(|row| row.find("p"))
        .map(|p| rewrite_byline(&p.text()))
        .map(|byline| crate::text::normalize_str(&byline))
        .unwrap_or_default();

    ContentItem::new(
        table,
        "techcrunch.Header",
        Variant::DocumentHeader {
            document: ctx.document(),
            title,
            byline,
            logo,
        },
    )
}
