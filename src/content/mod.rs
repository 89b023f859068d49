//! Content-item classification.
//!
//! Every DOM node an emitter yields is classified into exactly one
//! [`ContentItem`] by walking an ordered list of [`Rule`]s, first match
//! wins. Each template family contributes its own rule slice; the generic
//! slice always comes last and ends in a rule that accepts everything, so
//! classification is total.
//!
//! Items are built once and then only read: any work with side effects
//! (video lookups, tweet decomposition, classifying blockquote children)
//! happens in the rule's constructor.

pub mod generic;
pub mod ghost;
pub mod mailgun;
pub mod substack;
pub mod techcrunch;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::description::DescriptionItem;
use crate::dom::NodeRef;
use crate::ssml::SsmlNode;
use crate::ssml::tags;
use crate::text::normalize;
use crate::tweet::{BrokenTweet, Tweet};
use crate::util::escape_text;

/// Metadata about the newsletter being converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: String,
    pub sender: String,
    pub owner: String,
    pub date: String,
}

/// Title and author of a video, as reported by a [`VideoMetadataLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
}

/// Error returned by a video lookup.
pub type LookupError = Box<dyn std::error::Error + Send + Sync>;

/// Best-effort video metadata lookup, injected by the caller.
///
/// Called at most once per video item. Failures are logged and the item
/// simply produces no speech.
pub trait VideoMetadataLookup {
    fn lookup(&self, video_id: &str) -> Result<VideoMetadata, LookupError>;
}

impl<F> VideoMetadataLookup for F
where
    F: Fn(&str) -> Result<VideoMetadata, LookupError>,
{
    fn lookup(&self, video_id: &str) -> Result<VideoMetadata, LookupError> {
        self(video_id)
    }
}

/// Lookup that always fails; videos are announced by their description only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVideoLookup;

impl VideoMetadataLookup for NoVideoLookup {
    fn lookup(&self, _video_id: &str) -> Result<VideoMetadata, LookupError> {
        Err("video lookup is disabled".into())
    }
}

/// One entry of a classification registry.
pub struct Rule {
    /// `family.Name`, reported by section inspection.
    pub name: &'static str,
    pub matches: fn(NodeRef<'_>) -> bool,
    pub build: for<'a> fn(NodeRef<'a>, &Context<'a>) -> Variant<'a>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Why an item contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    CallToAction,
    Footer,
    Paywall,
    VisibilityWrapper,
    ReadMore,
    HorizontalRule,
    Logo,
    Byline,
    Empty,
    Boilerplate,
    Unmatched,
}

/// Caption attached to an image item.
#[derive(Debug, Clone)]
pub enum Caption<'a> {
    /// Caption element rendered as-is.
    Node(NodeRef<'a>),
    /// Caption text wrapped in a paragraph.
    Text(String),
}

/// The closed set of content shapes.
#[derive(Debug, Clone)]
pub enum Variant<'a> {
    Paragraph,
    ListEntry,
    Header {
        level: u8,
    },
    Blockquote {
        children: Vec<ContentItem<'a>>,
    },
    List,
    Image {
        image: Option<NodeRef<'a>>,
        caption: Option<Caption<'a>>,
    },
    Video {
        metadata: Option<VideoMetadata>,
    },
    Tweet(Result<Tweet, BrokenTweet>),
    TweetEmbed,
    DocumentHeader {
        document: &'a DocumentInfo,
        title: String,
        byline: String,
        logo: Option<NodeRef<'a>>,
    },
    Skipped(SkipReason),
}

/// A classified node.
#[derive(Debug, Clone)]
pub struct ContentItem<'a> {
    node: NodeRef<'a>,
    rule: &'static str,
    variant: Variant<'a>,
}

/// Pause before a header, by level.
fn header_pause_ms(level: u8) -> u32 {
    match level {
        1 => 750,
        2 => 650,
        3 => 500,
        4 => 450,
        5 => 400,
        _ => 350,
    }
}

impl<'a> ContentItem<'a> {
    pub fn new(node: NodeRef<'a>, rule: &'static str, variant: Variant<'a>) -> Self {
        Self {
            node,
            rule,
            variant,
        }
    }

    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    /// Name of the rule that produced this item.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn variant(&self) -> &Variant<'a> {
        &self.variant
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self.variant, Variant::Skipped(SkipReason::Unmatched))
    }

    /// Speech for this item, possibly empty.
    pub fn speech(&self) -> Vec<SsmlNode> {
        match &self.variant {
            Variant::Paragraph | Variant::ListEntry | Variant::TweetEmbed => {
                let text = normalize(self.node);
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![tags::p_text(text)]
                }
            }
            Variant::Header { level } => {
                let text = normalize(self.node);
                if text.is_empty() {
                    return Vec::new();
                }
                vec![tags::pause_ms(header_pause_ms(*level)), tags::ps_text(text)]
            }
            Variant::Blockquote { children } => {
                let inner: Vec<SsmlNode> = children.iter().flat_map(ContentItem::speech).collect();
                if inner.is_empty() {
                    return Vec::new();
                }
                let mut speech = Vec::with_capacity(inner.len() + 2);
                speech.push(tags::p_text("Quote."));
                speech.extend(inner);
                speech.push(tags::p_text("End quote."));
                speech
            }
            Variant::List => self
                .node
                .contents()
                .map(normalize)
                .filter(|text| !text.is_empty())
                .map(tags::p_text)
                .collect(),
            Variant::Video { metadata } => metadata
                .iter()
                .map(|m| tags::ps_text(format!("YouTube video '{}' by {}", m.title, m.author)))
                .collect(),
            Variant::Tweet(Ok(tweet)) => tweet.speech(),
            Variant::Tweet(Err(_)) => vec![tags::p_text("Broken tweet: Fix me.")],
            Variant::DocumentHeader { title, byline, .. } => {
                let mut speech = Vec::with_capacity(3);
                if !title.is_empty() {
                    speech.push(tags::p_text(title.as_str()));
                }
                if !byline.is_empty() {
                    speech.push(tags::p_text(byline.as_str()));
                }
                speech.push(tags::pause_ms(750));
                speech
            }
            Variant::Image { .. } | Variant::Skipped(_) => Vec::new(),
        }
    }

    /// Description fragments for this item, possibly empty.
    pub fn description(&self) -> Vec<DescriptionItem<'a>> {
        match &self.variant {
            Variant::Paragraph | Variant::ListEntry | Variant::Header { .. } | Variant::List => {
                vec![DescriptionItem::text(self.node)]
            }
            Variant::Blockquote { children } => {
                children.iter().flat_map(ContentItem::description).collect()
            }
            Variant::Image { image, caption } => {
                let mut out = Vec::with_capacity(2);
                if let Some(image) = image {
                    out.push(DescriptionItem::image(*image));
                }
                match caption {
                    Some(Caption::Node(node)) => out.push(DescriptionItem::text(*node)),
                    Some(Caption::Text(text)) => out.push(DescriptionItem::text_markup(format!(
                        "<p>{}</p>",
                        escape_text(text)
                    ))),
                    None => {}
                }
                out
            }
            Variant::Video { .. } | Variant::Tweet(_) | Variant::TweetEmbed => {
                vec![DescriptionItem::embed(self.node)]
            }
            Variant::DocumentHeader {
                title,
                byline,
                logo,
                ..
            } => {
                let mut out = Vec::with_capacity(3);
                if let Some(logo) = logo {
                    out.push(DescriptionItem::utility(*logo));
                }
                out.push(DescriptionItem::utility_markup(format!(
                    "<h2>{}</h2>",
                    escape_text(title)
                )));
                if !byline.is_empty() {
                    out.push(DescriptionItem::utility_markup(format!(
                        "<p>{}</p>",
                        escape_text(byline)
                    )));
                }
                out
            }
            Variant::Skipped(_) => Vec::new(),
        }
    }
}

/// Classification context shared by every rule during one conversion.
pub struct Context<'a> {
    document: &'a DocumentInfo,
    videos: &'a dyn VideoMetadataLookup,
    families: &'static [&'static [Rule]],
}

impl<'a> Context<'a> {
    /// Build a context that classifies with the given rule families, in order.
    pub fn new(
        document: &'a DocumentInfo,
        videos: &'a dyn VideoMetadataLookup,
        families: &'static [&'static [Rule]],
    ) -> Self {
        Self {
            document,
            videos,
            families,
        }
    }

    pub fn document(&self) -> &'a DocumentInfo {
        self.document
    }

    pub fn videos(&self) -> &'a dyn VideoMetadataLookup {
        self.videos
    }

    /// Classify a node with the first matching rule.
    pub fn classify(&self, node: NodeRef<'a>) -> ContentItem<'a> {
        for rule in self.families.iter().flat_map(|family| family.iter()) {
            if (rule.matches)(node) {
                log::trace!("{:?} matched {}", node, rule.name);
                return ContentItem::new(node, rule.name, (rule.build)(node, self));
            }
        }
        ContentItem::new(node, "generic.Null", Variant::Skipped(SkipReason::Unmatched))
    }
}

// ============================================================================
// Builders shared by several families
// ============================================================================

pub(crate) fn skip_cta<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::CallToAction)
}

pub(crate) fn skip_footer<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::Footer)
}

pub(crate) fn skip_rule<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::HorizontalRule)
}

/// Image plus an optional `<figcaption>`.
pub(crate) fn figure_image<'a>(node: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    let image = if node.is("img") {
        Some(node)
    } else {
        node.find("img")
    };
    let caption = node
        .find("figcaption")
        .map(normalize)
        .filter(|text| !text.is_empty())
        .map(Caption::Text);
    Variant::Image { image, caption }
}

/// True when the first meaningful child is an `<img>`.
pub(crate) fn starts_with_image(node: NodeRef<'_>) -> bool {
    node.contents().next().is_some_and(|first| first.is("img"))
}
