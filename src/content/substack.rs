//! Rules for Substack newsletters.
//!
//! Most rules carry two fingerprints: one for mail received straight from
//! Substack, and one for the same element after a forward through Gmail,
//! which strips classes and rewrites layout into nested tables.

use super::{Context, Rule, SkipReason, Variant, figure_image, skip_cta, skip_rule};
use crate::dom::NodeRef;
use crate::patterns::{VIDEO_ID_ATTR_RE, YOUTUBE_ID_RE};
use crate::text::is_only_link;
use crate::tweet;

pub const RULES: &[Rule] = &[
    Rule {
        name: "substack.Tweet",
        matches: tweet::is_tweet,
        build: tweet_item,
    },
    Rule {
        name: "substack.Youtube",
        matches: is_youtube,
        build: youtube,
    },
    Rule {
        name: "substack.Author",
        matches: is_author,
        build: author,
    },
    Rule {
        name: "substack.Button",
        matches: is_button,
        build: skip_cta,
    },
    Rule {
        name: "substack.CaptionedImage",
        matches: is_captioned_image,
        build: figure_image,
    },
    Rule {
        name: "substack.HorizontalRule",
        matches: is_horizontal_rule,
        build: skip_rule,
    },
];

fn tweet_item<'a>(node: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    let decomposed = tweet::decompose(node);
    if let Err(err) = &decomposed {
        log::warn!("{err}");
    }
    Variant::Tweet(decomposed)
}

fn is_youtube(node: NodeRef<'_>) -> bool {
    node.is("a") && node.class_ends_with("youtube-wrap")
}

/// Video id from the link target, or from the JSON blob Substack stores in
/// `data-attrs`.
fn video_id(node: NodeRef<'_>) -> Option<String> {
    if let Some(caps) = node.attr("href").and_then(|href| YOUTUBE_ID_RE.captures(href)) {
        return Some(caps[1].to_string());
    }
    node.attr("data-attrs")
        .and_then(|attrs| VIDEO_ID_ATTR_RE.captures(attrs))
        .map(|caps| caps[1].to_string())
}

fn youtube<'a>(node: NodeRef<'a>, ctx: &Context<'a>) -> Variant<'a> {
    let Some(id) = video_id(node) else {
        log::warn!("youtube embed without a recognizable video id");
        return Variant::Video { metadata: None };
    };

    let metadata = match ctx.videos().lookup(&id) {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            log::warn!("video metadata lookup for {id} failed: {err}");
            None
        }
    };
    Variant::Video { metadata }
}

fn is_author(node: NodeRef<'_>) -> bool {
    // Directly received
    if node.has_class("meta-author-wrap") {
        return true;
    }

    // Forwarded, gmail sanitised
    if !node.is("table") {
        return false;
    }
    node.rows()
        .first()
        .and_then(|row| row.element_children().filter(|c| c.is("td")).last())
        .and_then(|cell| cell.find("div"))
        .is_some_and(|div| {
            div.find_where(|n| n.is("td") && n.class_ends_with("post-meta-item"))
                .is_some()
        })
}

fn author<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::Byline)
}

fn is_button(node: NodeRef<'_>) -> bool {
    if node
        .find_where(|n| n.is("a") && n.class_ends_with("button"))
        .is_some()
    {
        return true;
    }

    if node.is("div") && node.class_ends_with("subscribe-widget") {
        return true;
    }

    if !node.is("p") {
        return false;
    }
    let mut children = node.children();
    let (Some(link), None) = (children.next(), children.next()) else {
        return false;
    };
    link.is("a") && link.find_all("span").count() == 1 && is_only_link(node)
}

fn is_captioned_image(node: NodeRef<'_>) -> bool {
    // Directly received
    if node.has_class("captioned-image-container-static") {
        return true;
    }

    // Forwarded, gmail sanitised
    if !node.is("div") {
        return false;
    }
    let mut tables = node.find_all("table");
    let (Some(table), None) = (tables.next(), tables.next()) else {
        return false;
    };
    table.find_all("td").count() == 3 && table.find_all("img").count() == 1
}

fn is_horizontal_rule(node: NodeRef<'_>) -> bool {
    let mut children = node.children();
    matches!((children.next(), children.next()), (Some(only), None) if only.is("hr"))
}
