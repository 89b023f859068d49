//! Embedded tweet decomposition.
//!
//! Newsletters paste tweets as static HTML: an author header, some text,
//! optional link cards and photos, and a footer with the timestamp and
//! counters. A quoted tweet nests a second author line and text inside the
//! first. [`decompose`] splits the markup into [`TweetComponent`]s and
//! reassembles them into a [`Tweet`] that knows how to speak itself.

mod component;

pub use component::{TweetComponent, component_root, components};

use crate::dom::NodeRef;
use crate::patterns::SHORT_LINK_RE;
use crate::ssml::{SsmlNode, tags};
use crate::text::{normalize, normalize_str};

/// Why a tweet could not be decomposed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrokenTweet {
    #[error("broken tweet: {0} components, expected at least 3")]
    TooFewComponents(usize),

    #[error("broken tweet: first component is not an author header")]
    MissingHeader,

    #[error("broken tweet: last component is not a footer")]
    MissingFooter,
}

/// A plain tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularTweet {
    pub author: String,
    pub text: String,
    /// Titles of the link cards attached to the tweet.
    pub links: Vec<String>,
}

/// A tweet quoting another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTweet {
    pub author: String,
    pub text: String,
    pub quoted_author: String,
    pub quoted_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tweet {
    Regular(RegularTweet),
    Quote(QuoteTweet),
}

impl Tweet {
    pub fn author(&self) -> &str {
        match self {
            Tweet::Regular(t) => &t.author,
            Tweet::Quote(t) => &t.author,
        }
    }

    pub fn speech(&self) -> Vec<SsmlNode> {
        match self {
            Tweet::Regular(tweet) => {
                let mut sentences = vec![tags::s_text(format!("Tweet by {}:", tweet.author))];
                if !tweet.text.is_empty() {
                    sentences.push(tags::s_text(tweet.text.as_str()));
                }
                sentences.extend(
                    tweet
                        .links
                        .iter()
                        .map(|title| tags::s_text(format!("Linking to: {title}."))),
                );
                vec![tags::p(sentences)]
            }
            Tweet::Quote(tweet) => {
                let mut outer = vec![tags::s_text(format!("Tweet by {}:", tweet.author))];
                if !tweet.text.is_empty() {
                    outer.push(tags::s_text(tweet.text.as_str()));
                }
                let mut speech = vec![
                    tags::p(outer),
                    tags::p_text(format!("To which {} replied:", tweet.quoted_author)),
                ];
                if !tweet.quoted_text.is_empty() {
                    speech.push(tags::p_text(tweet.quoted_text.as_str()));
                }
                speech
            }
        }
    }
}

/// True for a node that holds an embedded tweet: a `tweet` class token, or
/// any Twitter avatar image.
pub fn is_tweet(node: NodeRef<'_>) -> bool {
    node.has_class("tweet") || component::has_avatar(node)
}

/// Split a tweet node into components and reassemble them.
pub fn decompose(node: NodeRef<'_>) -> Result<Tweet, BrokenTweet> {
    let parts = components(component_root(node));

    if parts.len() < 3 {
        return Err(BrokenTweet::TooFewComponents(parts.len()));
    }
    let Some(TweetComponent::Header(header)) = parts.first() else {
        return Err(BrokenTweet::MissingHeader);
    };
    if !matches!(parts.last(), Some(TweetComponent::Footer(_))) {
        return Err(BrokenTweet::MissingFooter);
    }

    let author = handle_of(*header)
        .or_else(|| component::avatar_handle(*header))
        .unwrap_or_else(|| "Unknown".to_string());
    let body = &parts[1..parts.len() - 1];

    let split = body
        .iter()
        .position(|c| matches!(c, TweetComponent::RetweetHeader(_)));
    let tweet = match split {
        Some(at) => {
            let quoted_author = handle_of(body[at].node()).unwrap_or_else(|| "Unknown".to_string());
            Tweet::Quote(QuoteTweet {
                author,
                text: body_text(&body[..at]),
                quoted_author,
                quoted_text: body_text(&body[at + 1..]),
            })
        }
        None => Tweet::Regular(RegularTweet {
            author,
            text: body_text(body),
            links: body.iter().filter_map(link_title).collect(),
        }),
    };
    log::debug!("decomposed tweet by {}", tweet.author());
    Ok(tweet)
}

/// First span whose text is an `@handle`.
fn handle_of(node: NodeRef<'_>) -> Option<String> {
    node.find_all("span")
        .map(|span| span.text().trim().to_string())
        .find(|text| text.starts_with('@'))
}

/// Spoken text of the body pieces, with bare short links removed.
fn body_text(parts: &[TweetComponent<'_>]) -> String {
    let joined = parts
        .iter()
        .filter(|c| matches!(c, TweetComponent::Text(_) | TweetComponent::FakeLink(_)))
        .map(|c| normalize(c.node()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_str(&SHORT_LINK_RE.replace_all(&joined, ""))
}

fn link_title(part: &TweetComponent<'_>) -> Option<String> {
    let TweetComponent::Embed(card) = part else {
        return None;
    };
    let title = card
        .find_where(|n| n.class_contains("title"))
        .map(normalize)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| normalize(*card));
    let title = title.trim_end_matches('.').to_string();
    (!title.is_empty()).then_some(title)
}
