//! Item emitters.
//!
//! An emitter knows where a template family keeps its content inside the
//! mail body and yields that content as a lazy stream of classified
//! [`ContentItem`]s. Emitters never mutate the DOM.

mod generic;
mod roots;
pub mod techcrunch;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::{self, ContentItem, Context, Rule};
use crate::dom::NodeRef;
use crate::error::Error;

pub use generic::GenericWalk;
pub use techcrunch::TableKind;

/// Lazy stream of classified items.
pub type ItemStream<'a> = Box<dyn Iterator<Item = ContentItem<'a>> + 'a>;

/// A content-root lookup: the children of the content region, or nothing.
type RootLookup = for<'n> fn(NodeRef<'n>) -> Option<Vec<NodeRef<'n>>>;

/// Newsletter platform families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Generic,
    Ghost,
    Mailgun,
    Substack,
    TechCrunch,
}

const GENERIC: &[&[Rule]] = &[content::generic::RULES];
const GHOST: &[&[Rule]] = &[content::ghost::RULES, content::generic::RULES];
const MAILGUN: &[&[Rule]] = &[content::mailgun::RULES, content::generic::RULES];
const SUBSTACK: &[&[Rule]] = &[content::substack::RULES, content::generic::RULES];
const TECHCRUNCH: &[&[Rule]] = &[content::techcrunch::RULES, content::generic::RULES];

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Generic,
        Template::Ghost,
        Template::Mailgun,
        Template::Substack,
        Template::TechCrunch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Template::Generic => "generic",
            Template::Ghost => "ghost",
            Template::Mailgun => "mailgun",
            Template::Substack => "substack",
            Template::TechCrunch => "techcrunch",
        }
    }

    /// Rule families used to classify this template's nodes, generic last.
    pub fn families(self) -> &'static [&'static [Rule]] {
        match self {
            Template::Generic => GENERIC,
            Template::Ghost => GHOST,
            Template::Mailgun => MAILGUN,
            Template::Substack => SUBSTACK,
            Template::TechCrunch => TECHCRUNCH,
        }
    }

    /// Stream the items of the document rooted at `root`.
    ///
    /// `ctx` must have been built with [`families`](Self::families) of the
    /// same template.
    pub fn emit<'a>(self, root: NodeRef<'a>, ctx: &'a Context<'a>) -> ItemStream<'a> {
        match self {
            Template::Generic => Box::new(GenericWalk::new(root, ctx)),
            Template::Ghost => container_items(first_root(root, roots::GHOST), ctx),
            Template::Mailgun => container_items(first_root(root, roots::MAILGUN), ctx),
            Template::Substack => container_items(first_root(root, roots::SUBSTACK), ctx),
            Template::TechCrunch => techcrunch::items(root, ctx),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("unknown template: {s}")))
    }
}

/// Try each lookup in order until one finds a non-empty content region.
fn first_root<'a>(root: NodeRef<'a>, lookups: &[(&'static str, RootLookup)]) -> Vec<NodeRef<'a>> {
    for (name, lookup) in lookups {
        match lookup(root) {
            Some(children) if !children.is_empty() => {
                log::debug!("content root found by {name} ({} children)", children.len());
                return children;
            }
            _ => log::debug!("content root lookup {name} found nothing"),
        }
    }
    Vec::new()
}

/// Classify container children in order, one item per `li` of a list.
pub(crate) fn container_items<'a>(
    children: Vec<NodeRef<'a>>,
    ctx: &'a Context<'a>,
) -> ItemStream<'a> {
    Box::new(
        children
            .into_iter()
            .filter(|n| !n.is_comment() && !n.is_blank_text())
            .flat_map(|node| {
                if node.is("ul") || node.is("ol") {
                    node.element_children().filter(|c| c.is("li")).collect()
                } else {
                    vec![node]
                }
            })
            .map(move |node| ctx.classify(node)),
    )
}
