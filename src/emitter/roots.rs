//! Content-root lookups for the container-based families.
//!
//! Each family lists its lookups from most to least specific: the class the
//! platform emits, a fuzzy match that survives class prefixing by mail
//! clients, and a structural match for when classes are gone entirely.

use super::RootLookup;
use crate::dom::NodeRef;

pub(super) const GHOST: &[(&str, RootLookup)] = &[
    ("ghost.post-content-sans-serif", ghost_sans_serif),
    ("ghost.post-content", td_post_content_fuzzy),
    ("ghost.email-preview-content", ghost_preview_table),
];

pub(super) const MAILGUN: &[(&str, RootLookup)] = &[
    ("mailgun.post-content", mailgun_post_content),
    ("mailgun.post-content-fuzzy", td_post_content_fuzzy),
    ("mailgun.max-width-550", mailgun_fixed_width),
];

pub(super) const SUBSTACK: &[(&str, RootLookup)] = &[
    ("substack.post", substack_posts),
    ("substack.markup", substack_markup),
    ("substack.body", body),
];

fn contents(node: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    node.contents().collect()
}

fn ghost_sans_serif(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    root.find_where(|n| n.is("td") && n.has_class("post-content-sans-serif"))
        .map(contents)
}

fn td_post_content_fuzzy(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    root.find_where(|n| n.is("td") && n.class_contains("post-content"))
        .map(contents)
}

fn ghost_preview_table(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    root.find_where(|n| n.is("table") && n.attr("data-testid") == Some("email-preview-content"))?
        .find_where(|n| n.is("tr") && n.has_class("post-content-row"))?
        .element_children()
        .find(|n| n.is("td"))
        .map(contents)
}

fn mailgun_post_content(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    root.find_where(|n| n.is("td") && n.has_class("post-content"))
        .map(contents)
}

/// `div[style*="max-width: 550px"] > table > tr > td`
fn mailgun_fixed_width(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    let wrapper = root.find_where(|n| {
        n.is("div")
            && n
                .attr("style")
                .is_some_and(|style| style.contains("max-width: 550px"))
    })?;
    let table = wrapper.element_children().find(|n| n.is("table"))?;
    let row = table.rows().into_iter().next()?;
    row.element_children().find(|n| n.is("td")).map(contents)
}

/// First child div of every post container, in document order. Posts nested
/// inside an earlier post are already covered by it.
fn substack_posts(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    let mut posts: Vec<NodeRef<'_>> = Vec::new();
    for candidate in root
        .descendants()
        .filter(|n| n.is("div") && n.class_ends_with("post"))
    {
        let nested = candidate
            .ancestors()
            .any(|ancestor| posts.contains(&ancestor));
        if !nested {
            posts.push(candidate);
        }
    }

    let children: Vec<_> = posts
        .into_iter()
        .filter_map(|post| post.element_children().find(|n| n.is("div")))
        .flat_map(contents)
        .collect();
    Some(children)
}

fn substack_markup(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    root.find_where(|n| n.is("div") && n.class_contains("markup"))
        .map(contents)
}

fn body(root: NodeRef<'_>) -> Option<Vec<NodeRef<'_>>> {
    let body = if root.is("body") {
        root
    } else {
        root.find("body")?
    };
    Some(contents(body))
}
