//! Property tests over generated newsletters.

use proptest::prelude::*;

use mailcast::content::{Context, NoVideoLookup};
use mailcast::description::DescriptionItem;
use mailcast::dom::parse_html;
use mailcast::pipeline::{assemble_description_traced, chunk_speech};
use mailcast::pronunciation::{PronunciationGuide, default_entries};
use mailcast::ssml::tags;
use mailcast::{DocumentInfo, Error, Template};

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]{1,12}",
        Just("Substack".to_string()),
        Just("&amp;".to_string()),
        Just("&mdash;".to_string()),
        Just("GIF".to_string()),
    ]
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..30).prop_map(|words| words.join(" "))
}

/// Small HTML fragments in the shapes newsletters use.
fn block() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        sentence().prop_map(|s| format!("<p>{s}</p>")),
        sentence().prop_map(|s| format!("<h2>{s}</h2>")),
        sentence().prop_map(|s| format!("<ul><li>{s}</li><li>{s}</li></ul>")),
        sentence().prop_map(|s| format!("<blockquote><p>{s}</p></blockquote>")),
        sentence().prop_map(|s| format!(r#"<div class="tweet"><p>{s}</p></div>"#)),
        sentence().prop_map(|s| format!(r#"<a class="youtube-wrap" href="https://youtu.be/abcdefgh">{s}</a>"#)),
        Just(r#"<img src="x.png" alt="x">"#.to_string()),
        Just("<hr>".to_string()),
        Just("<!-- comment -->".to_string()),
        sentence(),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_flat_map(|children| {
            let body = children.concat();
            prop_oneof![
                Just(format!("<div>{body}</div>")),
                Just(format!("<table><tr><td>{body}</td></tr></table>")),
                Just(format!(r#"<div class="post"><div>{body}</div></div>"#)),
                Just(format!(r#"<td class="post-content">{body}</td>"#)),
            ]
        })
    })
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(block(), 1..8).prop_map(|blocks| format!("<html><body>{}</body></html>", blocks.concat()))
}

fn template() -> impl Strategy<Value = Template> {
    prop::sample::select(Template::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_classification_is_total(html in document(), template in template()) {
        let dom = parse_html(&html);
        let info = DocumentInfo::default();
        let ctx = Context::new(&info, &NoVideoLookup, template.families());
        for node in dom.root().descendants() {
            let item = ctx.classify(node);
            prop_assert!(!item.rule().is_empty());
            // Speech and description are pure.
            let speech: Vec<String> = item.speech().iter().map(ToString::to_string).collect();
            let again: Vec<String> = item.speech().iter().map(ToString::to_string).collect();
            prop_assert_eq!(speech, again);
            prop_assert_eq!(item.description().len(), item.description().len());
        }
    }

    #[test]
    fn prop_chunks_stay_within_limit(
        html in document(),
        template in template(),
        limit in 200usize..3000,
    ) {
        let config = mailcast::Config { speech_limit: limit, ..mailcast::Config::default() };
        let processor = mailcast::Processor::new(config).unwrap();
        match processor.process_html(&html, &DocumentInfo::default(), template) {
            Ok(parsed) => {
                for chunk in &parsed.ssml_chunks {
                    prop_assert!(chunk.len() <= limit, "{} > {}", chunk.len(), limit);
                    prop_assert!(chunk.starts_with("<speak>"));
                    prop_assert!(chunk.ends_with("</speak>"));
                }
            }
            Err(Error::NoContent { .. }) | Err(Error::ItemTooLong { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_chunking_preserves_order(sentences in prop::collection::vec(sentence(), 1..40)) {
        let guide = PronunciationGuide::new(default_entries());
        let nodes: Vec<_> = sentences.iter().map(|s| tags::p_text(s.as_str())).collect();
        let expected: String = nodes.iter().map(|n| guide.apply(n).to_string()).collect();
        let chunks = chunk_speech(nodes, &guide, 10_000).unwrap();
        let joined: String = chunks
            .iter()
            .map(|c| c.trim_start_matches("<speak>").trim_end_matches("</speak>"))
            .collect();
        prop_assert_eq!(joined, expected);
    }

    #[test]
    fn prop_description_shrinks_monotonically(
        html in document(),
        limit in prop::option::of(0usize..2000),
    ) {
        let dom = parse_html(&html);
        let info = DocumentInfo { title: "Title".into(), ..DocumentInfo::default() };
        let ctx = Context::new(&info, &NoVideoLookup, Template::Generic.families());
        let items: Vec<DescriptionItem<'_>> = Template::Generic
            .emit(dom.root(), &ctx)
            .flat_map(|item| item.description())
            .collect();
        let (fragments, trace) = assemble_description_traced(&info.title, &items, limit);

        prop_assert!(trace.windows(2).all(|w| w[1] <= w[0]));
        prop_assert!(trace.len() <= 2 * mailcast::description::ContentKind::ALL.len() + 1);
        prop_assert_eq!(fragments.first().map(String::as_str), Some("<h1>Title</h1>"));
        if let Some(limit) = limit {
            let joined = fragments.join("\n");
            prop_assert!(joined.len() <= limit || fragments.len() == 1);
        }
    }
}
