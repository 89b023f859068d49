//! End-to-end conversion: HTML in, speech chunks and description out.

use serde::Serialize;

use crate::config::Config;
use crate::content::{ContentItem, Context, DocumentInfo, NoVideoLookup, VideoMetadataLookup};
use crate::description::{ContentKind, DescriptionItem};
use crate::dom::{Dom, NodeRef, parse_html, parse_html_bytes};
use crate::emitter::Template;
use crate::error::{Error, Result};
use crate::pronunciation::PronunciationGuide;
use crate::ssml::{SPEAK_ENVELOPE_LEN, SsmlNode, tags};
use crate::util::escape_text;

/// Result of converting one newsletter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedItem {
    /// Complete `<speak>` documents, each within the speech limit.
    pub ssml_chunks: Vec<String>,
    /// Sanitized HTML fragments, title first.
    pub description_fragments: Vec<String>,
}

impl ParsedItem {
    /// Description fragments joined by newlines.
    pub fn combined_description(&self) -> String {
        self.description_fragments.join("\n")
    }
}

/// Per-item report used to debug template fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub index: usize,
    pub rule: &'static str,
    /// Tag of the classified node; `None` for text runs.
    pub tag: Option<String>,
    pub speech: Vec<String>,
    pub description: Vec<(ContentKind, String)>,
}

/// Pack speech nodes greedily into `<speak>` documents of at most `limit`
/// characters.
///
/// Each node is rewritten by `guide` first and measured after rewriting, so
/// every emitted chunk is exactly as long as measured. A node that does not
/// fit into an empty `<speak>` fails with [`Error::ItemTooLong`].
pub fn chunk_speech<I>(nodes: I, guide: &PronunciationGuide, limit: usize) -> Result<Vec<String>>
where
    I: IntoIterator<Item = SsmlNode>,
{
    let mut chunks = Vec::new();
    let mut window: Vec<SsmlNode> = Vec::new();
    let mut window_len = SPEAK_ENVELOPE_LEN;

    for node in nodes {
        let guided = guide.apply(&node);
        let len = guided.serialized_len();
        if SPEAK_ENVELOPE_LEN + len > limit {
            return Err(Error::ItemTooLong {
                length: SPEAK_ENVELOPE_LEN + len,
                limit,
            });
        }
        if window_len + len > limit {
            chunks.push(flush(&mut window, window_len));
            window_len = SPEAK_ENVELOPE_LEN;
        }
        window.push(guided);
        window_len += len;
    }

    if !window.is_empty() {
        chunks.push(flush(&mut window, window_len));
    }
    Ok(chunks)
}

fn flush(window: &mut Vec<SsmlNode>, measured: usize) -> String {
    let chunk = tags::speak(std::mem::take(window)).to_string();
    debug_assert_eq!(chunk.len(), measured);
    log::debug!("flushing speech chunk of {} characters", chunk.len());
    chunk
}

fn title_fragment(title: &str) -> Option<String> {
    (!title.is_empty()).then(|| format!("<h1>{}</h1>", escape_text(title)))
}

/// Newline-joined length of the title plus `fragments`.
fn joined_len(title: Option<&String>, fragments: &[(ContentKind, String)]) -> usize {
    let parts = fragments.len() + usize::from(title.is_some());
    let bytes: usize =
        title.map_or(0, String::len) + fragments.iter().map(|(_, f)| f.len()).sum::<usize>();
    bytes + parts.saturating_sub(1)
}

fn render_all(
    items: &[DescriptionItem<'_>],
    strip_links: bool,
    excluded: &[ContentKind],
) -> Vec<(ContentKind, String)> {
    items
        .iter()
        .filter(|item| !excluded.contains(&item.kind()))
        .map(|item| (item.kind(), item.render(strip_links)))
        .filter(|(_, fragment)| !fragment.is_empty())
        .collect()
}

/// Kind contributing the most bytes; the first kind in [`ContentKind::ALL`]
/// order wins a tie.
fn heaviest_kind(fragments: &[(ContentKind, String)]) -> Option<ContentKind> {
    ContentKind::ALL
        .into_iter()
        .map(|kind| {
            let bytes: usize = fragments
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, f)| f.len())
                .sum();
            (kind, bytes)
        })
        .filter(|(_, bytes)| *bytes > 0)
        .fold(None, |best: Option<(ContentKind, usize)>, (kind, bytes)| match best {
            Some((_, most)) if most >= bytes => best,
            _ => Some((kind, bytes)),
        })
        .map(|(kind, _)| kind)
}

/// Fit the description into `limit`, shrinking step by step.
///
/// Returns the fragments and the joined length after every rendering pass,
/// which never grows from one pass to the next.
pub fn assemble_description_traced(
    title: &str,
    items: &[DescriptionItem<'_>],
    limit: Option<usize>,
) -> (Vec<String>, Vec<usize>) {
    let title = title_fragment(title);
    let finish = |fragments: Vec<(ContentKind, String)>| -> Vec<String> {
        title
            .iter()
            .cloned()
            .chain(fragments.into_iter().map(|(_, f)| f))
            .collect()
    };

    let mut trace = Vec::new();
    let mut fragments = render_all(items, false, &[]);
    trace.push(joined_len(title.as_ref(), &fragments));
    let Some(limit) = limit else {
        return (finish(fragments), trace);
    };
    if trace[0] <= limit {
        return (finish(fragments), trace);
    }

    log::debug!("description is {} characters, stripping links", trace[0]);
    let mut excluded: Vec<ContentKind> = Vec::new();
    loop {
        fragments = render_all(items, true, &excluded);
        let len = joined_len(title.as_ref(), &fragments);
        trace.push(len);
        if len <= limit {
            return (finish(fragments), trace);
        }
        match heaviest_kind(&fragments) {
            Some(kind) => {
                log::debug!("description is {len} characters, dropping {kind} fragments");
                excluded.push(kind);
            }
            None => {
                log::warn!("description cannot fit in {limit} characters, keeping the title only");
                return (finish(Vec::new()), trace);
            }
        }
    }
}

/// Fit the description into `limit`: first without links, then by dropping
/// whole content kinds, largest first, down to the title alone.
pub fn assemble_description(
    title: &str,
    items: &[DescriptionItem<'_>],
    limit: Option<usize>,
) -> Vec<String> {
    assemble_description_traced(title, items, limit).0
}

/// Converts newsletters with one set of settings.
pub struct Processor<'v> {
    config: Config,
    guide: PronunciationGuide,
    videos: &'v dyn VideoMetadataLookup,
}

impl Processor<'static> {
    /// A processor without video lookups.
    ///
    /// Fails with [`Error::Config`] when `config` does not pass
    /// [`Config::validate`].
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: Config) -> Self {
        let guide = config.guide();
        Self {
            config,
            guide,
            videos: &NoVideoLookup,
        }
    }
}

impl Default for Processor<'static> {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl<'v> Processor<'v> {
    /// Use `videos` to name embedded videos.
    pub fn with_video_lookup<'w>(self, videos: &'w dyn VideoMetadataLookup) -> Processor<'w> {
        Processor {
            config: self.config,
            guide: self.guide,
            videos,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Template registered for the document's sender.
    pub fn template_for(&self, info: &DocumentInfo) -> Template {
        self.config.selector().select(&info.sender)
    }

    pub fn process_html(&self, html: &str, info: &DocumentInfo, template: Template) -> Result<ParsedItem> {
        self.process_dom(&parse_html(html), info, template)
    }

    /// Like [`process_html`](Self::process_html), decoding the bytes first.
    pub fn process_bytes(&self, html: &[u8], info: &DocumentInfo, template: Template) -> Result<ParsedItem> {
        self.process_dom(&parse_html_bytes(html), info, template)
    }

    /// Convert with the template selected from `info.sender`.
    pub fn process_for_sender(&self, html: &str, info: &DocumentInfo) -> Result<ParsedItem> {
        self.process_html(html, info, self.template_for(info))
    }

    pub fn process_dom(&self, dom: &Dom, info: &DocumentInfo, template: Template) -> Result<ParsedItem> {
        process(dom.root(), info, template, &self.config, &self.guide, self.videos)
    }

    pub fn inspect(&self, dom: &Dom, info: &DocumentInfo, template: Template) -> Vec<Section> {
        inspect(dom.root(), info, template, self.videos)
    }
}

/// Convert the document under `root`.
pub fn process(
    root: NodeRef<'_>,
    info: &DocumentInfo,
    template: Template,
    config: &Config,
    guide: &PronunciationGuide,
    videos: &dyn VideoMetadataLookup,
) -> Result<ParsedItem> {
    let ctx = Context::new(info, videos, template.families());
    let items: Vec<ContentItem<'_>> = template.emit(root, &ctx).collect();
    if items.is_empty() {
        return Err(Error::NoContent {
            template: template.to_string(),
        });
    }
    log::debug!("{} items emitted by the {template} template", items.len());

    let speech = items.iter().flat_map(ContentItem::speech);
    let ssml_chunks = chunk_speech(speech, guide, config.speech_limit)?;

    let descriptions: Vec<DescriptionItem<'_>> =
        items.iter().flat_map(ContentItem::description).collect();
    let description_fragments =
        assemble_description(&info.title, &descriptions, config.description_limit);

    Ok(ParsedItem {
        ssml_chunks,
        description_fragments,
    })
}

/// Report how every emitted item was classified and what it produces.
pub fn inspect(
    root: NodeRef<'_>,
    info: &DocumentInfo,
    template: Template,
    videos: &dyn VideoMetadataLookup,
) -> Vec<Section> {
    let ctx = Context::new(info, videos, template.families());
    template
        .emit(root, &ctx)
        .enumerate()
        .map(|(index, item)| Section {
            index,
            rule: item.rule(),
            tag: item.node().tag().map(str::to_string),
            speech: item.speech().iter().map(ToString::to_string).collect(),
            description: item
                .description()
                .iter()
                .map(|d| (d.kind(), d.render(false)))
                .collect(),
        })
        .collect()
}
