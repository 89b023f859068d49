//! TechCrunch emitter.
//!
//! The mail body is one outer table whose rows each hold a section table.
//! Section tables are sorted by shape before any of their cells are looked
//! at: only the header and the story tables carry content.

use super::{ItemStream, container_items};
use crate::content::techcrunch::{TITLE_SEPARATORS, document_header};
use crate::content::{ContentItem, Context};
use crate::dom::NodeRef;

/// Kinds of section table, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Header,
    Sponsored,
    Jobs,
    ReadMore,
    Social,
    Footer,
    Content,
    ContentWithImage,
    Null,
}

const TABLE_RULES: &[(TableKind, fn(NodeRef<'_>) -> bool)] = &[
    (TableKind::Header, is_header),
    (TableKind::Sponsored, is_sponsored),
    (TableKind::Jobs, is_jobs),
    (TableKind::ReadMore, is_read_more),
    (TableKind::Social, is_social),
    (TableKind::Footer, is_footer),
    (TableKind::Content, is_content),
    (TableKind::ContentWithImage, is_content_with_image),
];

impl TableKind {
    pub fn classify(table: NodeRef<'_>) -> Self {
        TABLE_RULES
            .iter()
            .find(|(_, matches)| matches(table))
            .map_or(TableKind::Null, |(kind, _)| *kind)
    }

    /// Whether tables of this kind contribute items.
    pub fn has_content(self) -> bool {
        matches!(
            self,
            TableKind::Header | TableKind::Content | TableKind::ContentWithImage
        )
    }
}

/// Exactly `n` meaningful children, all `tag`.
fn only_children<'a>(node: NodeRef<'a>, tag: &str, n: usize) -> Option<Vec<NodeRef<'a>>> {
    let children = node.layout_children();
    (children.len() == n && children.iter().all(|c| c.is(tag))).then_some(children)
}

fn only_child<'a>(node: NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    only_children(node, tag, 1).map(|children| children[0])
}

/// Follow first descendants through `path`.
fn descend<'a>(node: NodeRef<'a>, path: &[&str]) -> Option<NodeRef<'a>> {
    path.iter().try_fold(node, |current, tag| current.find(tag))
}

const STORY_CELL: &[&str] = &["tr", "td", "table", "tr", "td", "table", "tr", "td"];

/// `table > tr > td`, each level the only child of its parent.
fn single_cell(table: NodeRef<'_>) -> Option<NodeRef<'_>> {
    only_child(only_child(table, "tr")?, "td")
}

/// The story cell, three single-cell tables deep.
fn strict_story_cell(table: NodeRef<'_>) -> Option<NodeRef<'_>> {
    let inner = only_child(single_cell(table)?, "table")?;
    let inner = only_child(single_cell(inner)?, "table")?;
    single_cell(inner)
}

fn is_header(table: NodeRef<'_>) -> bool {
    let rows = table.rows();
    if rows.len() != 3 {
        return false;
    }
    rows[2]
        .find("td")
        .and_then(|td| td.find("p"))
        .is_some_and(|p| {
            let text = p.text();
            TITLE_SEPARATORS.iter().any(|sep| text.contains(sep))
        })
}

fn is_sponsored(table: NodeRef<'_>) -> bool {
    strict_story_cell(table).is_some_and(|cell| {
        cell.find_all("h3")
            .any(|h3| h3.text().contains("Sponsored by"))
    })
}

fn is_jobs(table: NodeRef<'_>) -> bool {
    let Some(inner) = single_cell(table).and_then(|td| only_child(td, "table")) else {
        return false;
    };
    let Some(rows) = only_children(inner, "tr", 2) else {
        return false;
    };
    only_child(rows[0], "td")
        .and_then(|td| only_child(td, "h2"))
        .is_some_and(|h2| h2.text().trim().starts_with("Newest Jobs"))
}

fn is_read_more(table: NodeRef<'_>) -> bool {
    single_cell(table)
        .and_then(|td| only_child(td, "p"))
        .is_some_and(|p| p.text().trim().starts_with("Read more"))
}

fn is_social(table: NodeRef<'_>) -> bool {
    single_cell(table).is_some_and(|td| td.find_all("img").count() > 3)
}

fn is_footer(table: NodeRef<'_>) -> bool {
    single_cell(table).is_some_and(|td| {
        let ps: Vec<_> = td.find_all("p").collect();
        ps.len() == 3 && ps[1].text().contains("Privacy Policy")
    })
}

fn is_content(table: NodeRef<'_>) -> bool {
    strict_story_cell(table).is_some()
}

fn is_content_with_image(table: NodeRef<'_>) -> bool {
    let Some(inner) = single_cell(table).and_then(|td| only_child(td, "table")) else {
        return false;
    };
    only_children(inner, "tr", 2)
        .and_then(|rows| rows[1].find("td"))
        .is_some_and(|td| td.find("img").is_some())
}

/// Items of one section table.
fn table_items<'a>(table: NodeRef<'a>, ctx: &'a Context<'a>) -> ItemStream<'a> {
    let kind = TableKind::classify(table);
    log::debug!("techcrunch section table {table:?} is {kind:?}");
    match kind {
        TableKind::Header => Box::new(std::iter::once(document_header(table, ctx))),
        TableKind::Content => {
            let story = descend(table, STORY_CELL)
                .map(|cell| cell.contents().collect())
                .unwrap_or_default();
            container_items(story, ctx)
        }
        TableKind::ContentWithImage => {
            let story: Vec<NodeRef<'a>> = descend(table, STORY_CELL)
                .map(|cell| cell.contents().collect())
                .unwrap_or_default();
            let image_cell = descend(table, &["tr", "td", "table"])
                .and_then(|inner| inner.rows().last().copied())
                .and_then(|row| row.find("td"));
            Box::new(
                container_items(story, ctx)
                    .chain(image_cell.into_iter().map(move |td| ctx.classify(td))),
            )
        }
        _ => Box::new(std::iter::empty::<ContentItem<'a>>()),
    }
}

/// Every section table of the first table's rows, in order.
pub(super) fn items<'a>(root: NodeRef<'a>, ctx: &'a Context<'a>) -> ItemStream<'a> {
    let Some(outer) = root.find("table") else {
        log::debug!("techcrunch layout table not found");
        return Box::new(std::iter::empty());
    };
    let sections: Vec<NodeRef<'a>> = outer
        .rows()
        .into_iter()
        .filter_map(|row| row.find("td").and_then(|td| td.find("table")))
        .collect();
    Box::new(
        sections
            .into_iter()
            .flat_map(move |table| table_items(table, ctx)),
    )
}
