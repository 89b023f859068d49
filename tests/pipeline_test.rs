//! End-to-end conversion tests.
//!
//! These exercise the whole path from HTML through classification, speech
//! chunking and description assembly.

use mailcast::description::{ContentKind, DescriptionItem};
use mailcast::dom::parse_html;
use mailcast::pipeline::{assemble_description, assemble_description_traced};
use mailcast::{Config, DocumentInfo, Error, Processor, Template};

fn info(title: &str) -> DocumentInfo {
    DocumentInfo {
        title: title.into(),
        sender: "writer@example.com".into(),
        owner: "owner@example.com".into(),
        date: "2024-06-01".into(),
    }
}

// ============================================================================
// Speech chunking
// ============================================================================

#[test]
fn test_three_long_paragraphs_make_two_chunks() {
    let paragraph = "word ".repeat(400);
    let html = format!(
        "<p>{}</p><p>{}</p><p>{}</p>",
        paragraph, paragraph, paragraph
    );
    // 2000 characters each, trimmed to 1999 once normalized.
    let parsed = Processor::default()
        .process_html(&html, &info("Three"), Template::Generic)
        .unwrap();

    assert_eq!(parsed.ssml_chunks.len(), 2);
    assert!(parsed.ssml_chunks.iter().all(|c| c.len() <= 4500));
    assert_eq!(parsed.ssml_chunks[0].matches("<p>").count(), 2);
    assert_eq!(parsed.ssml_chunks[1].matches("<p>").count(), 1);
}

#[test]
fn test_single_oversized_paragraph_fails() {
    let html = format!("<p>{}</p>", "x".repeat(5000));
    let err = Processor::default()
        .process_html(&html, &info("Long"), Template::Generic)
        .unwrap_err();
    assert!(matches!(err, Error::ItemTooLong { limit: 4500, .. }));
}

#[test]
fn test_custom_speech_limit() {
    let config = Config {
        speech_limit: 200,
        ..Config::default()
    };
    let html: String = (0..20).map(|i| format!("<p>Paragraph number {i}</p>")).collect();
    let parsed = Processor::new(config)
        .unwrap()
        .process_html(&html, &info("Many"), Template::Generic)
        .unwrap();
    assert!(parsed.ssml_chunks.len() > 1);
    assert!(parsed.ssml_chunks.iter().all(|c| c.len() <= 200));

    let joined = parsed.ssml_chunks.concat();
    for i in 0..20 {
        assert!(joined.contains(&format!("<p>Paragraph number {i}</p>")));
    }
}

#[test]
fn test_pronunciation_guide_applied() {
    let html = "<p>Welcome to my substack about SaaS.</p>";
    let parsed = Processor::default()
        .process_html(html, &info("Guide"), Template::Generic)
        .unwrap();
    let chunk = &parsed.ssml_chunks[0];
    assert!(chunk.contains(r#"<phoneme alphabet="ipa" ph="ˈsʌbstæk">substack</phoneme>"#));
    assert!(chunk.contains(r#"<phoneme alphabet="ipa" ph="sæs">SaaS</phoneme>"#));
}

#[test]
fn test_empty_document_has_no_content() {
    let err = Processor::default()
        .process_html("<html><body></body></html>", &info("Empty"), Template::Ghost)
        .unwrap_err();
    match err {
        Error::NoContent { template } => assert_eq!(template, "ghost"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_sender_selects_template() {
    let html = r#"<div class="post"><div><p>Hello from a post</p>
        <p class="button-wrapper"><a class="button" href="/subscribe"><span>Subscribe</span></a></p></div></div>"#;
    let processor = Processor::default();
    let mut document = info("Post");
    document.sender = "Writer <writer@newsletter.substack.com>".into();
    assert_eq!(processor.template_for(&document), Template::Substack);

    let parsed = processor.process_for_sender(html, &document).unwrap();
    assert_eq!(parsed.ssml_chunks.len(), 1);
    assert!(parsed.ssml_chunks[0].contains("Hello from a post"));
    assert!(!parsed.ssml_chunks[0].contains("Subscribe"));
}

#[test]
fn test_bytes_are_decoded() {
    let html = b"<html><head><meta charset=\"windows-1252\"></head><body><p>It\x92s here</p></body></html>";
    let parsed = Processor::default()
        .process_bytes(html, &info("Bytes"), Template::Generic)
        .unwrap();
    assert!(parsed.ssml_chunks[0].contains("<p>It's here</p>"));
}

// ============================================================================
// Description assembly
// ============================================================================

#[test]
fn test_description_keeps_links_when_it_fits() {
    let html = r#"<p>Read <a href="https://example.com/a" class="x">this</a>.</p>"#;
    let parsed = Processor::default()
        .process_html(html, &info("Links"), Template::Generic)
        .unwrap();
    assert_eq!(
        parsed.description_fragments,
        vec![
            "<h1>Links</h1>",
            r#"<p>Read <a href="https://example.com/a">this</a>.</p>"#
        ]
    );
    assert_eq!(
        parsed.combined_description(),
        "<h1>Links</h1>\n<p>Read <a href=\"https://example.com/a\">this</a>.</p>"
    );
}

#[test]
fn test_description_strips_links_first() {
    let dom = parse_html(r#"<p><a href="https://example.com/a/very/long/path">x</a></p>"#);
    let p = dom.body().find("p").unwrap();
    let items = vec![DescriptionItem::text(p)];
    let fragments = assemble_description("T", &items, Some(30));
    assert_eq!(fragments, vec!["<h1>T</h1>", "<p><a>x</a></p>"]);
}

#[test]
fn test_description_evicts_largest_kind() {
    let text = format!("<p>{}</p>", "t".repeat(493));
    let image = format!(r#"<img src="{}"/>"#, "i".repeat(8987));
    let embed = format!("<div>{}</div>", "e".repeat(189));
    assert_eq!(text.len(), 500);
    assert_eq!(image.len(), 9000);
    assert_eq!(embed.len(), 200);

    let items = vec![
        DescriptionItem::text_markup(text.clone()),
        DescriptionItem::new(
            ContentKind::Image,
            mailcast::description::Payload::Markup(image),
        ),
        DescriptionItem::new(
            ContentKind::Embed,
            mailcast::description::Payload::Markup(embed.clone()),
        ),
    ];
    let (fragments, trace) = assemble_description_traced("T", &items, Some(1000));
    assert_eq!(fragments, vec!["<h1>T</h1>".to_string(), text, embed]);
    assert!(trace.windows(2).all(|w| w[1] <= w[0]));
    assert!(*trace.last().unwrap() <= 1000);
}
