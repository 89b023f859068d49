//! Whole-document conversions for each template family.

use mailcast::content::{LookupError, VideoMetadata};
use mailcast::description::ContentKind;
use mailcast::dom::parse_html;
use mailcast::{DocumentInfo, Processor, Template};

fn info(title: &str) -> DocumentInfo {
    DocumentInfo {
        title: title.into(),
        ..DocumentInfo::default()
    }
}

fn speech_of(html: &str, template: Template) -> String {
    Processor::default()
        .process_html(html, &info("Issue"), template)
        .unwrap()
        .ssml_chunks
        .concat()
}

const GHOST_ISSUE: &str = r#"<html><body>
<table class="body"><tr><td>
  <table class="container"><tr><td class="post-content-sans-serif">
    <h1>Quarterly update</h1>
    <p>We shipped the thing.</p>
    <div class="kg-card kg-image-card"><img src="https://ghost.example/chart.png" alt="Chart"><figcaption>Growth</figcaption></div>
    <table class="kg-card kg-cta-card"><tr><td><p>Upgrade to premium</p></td></tr></table>
    <div class="kg-paywall"><p>Members only below</p></div>
    <ul><li>First point</li><li>Second point</li></ul>
  </td></tr>
  <tr><td class="footer">Unsubscribe from this list</td></tr></table>
</td></tr></table>
</body></html>"#;

#[test]
fn test_ghost_issue() {
    let speech = speech_of(GHOST_ISSUE, Template::Ghost);
    assert!(speech.contains(r#"<break time="750ms" /><p><s>Quarterly update</s></p>"#));
    assert!(speech.contains("<p>We shipped the thing.</p>"));
    assert!(speech.contains("<p>First point</p><p>Second point</p>"));
    assert!(!speech.contains("Upgrade"));
    assert!(!speech.contains("Members only"));
    assert!(!speech.contains("Unsubscribe"));

    let dom = parse_html(GHOST_ISSUE);
    let sections = Processor::default().inspect(&dom, &info("Issue"), Template::Ghost);
    let rules: Vec<_> = sections.iter().map(|s| s.rule).collect();
    assert_eq!(
        rules,
        vec![
            "generic.Header",
            "generic.Paragraph",
            "ghost.ImageCard",
            "ghost.CtaCard",
            "ghost.Paywall",
            "generic.ListEntry",
            "generic.ListEntry",
        ]
    );
    let image = &sections[2];
    assert!(image.speech.is_empty());
    assert_eq!(
        image.description,
        vec![
            (
                ContentKind::Image,
                r#"<img src="https://ghost.example/chart.png" alt="Chart"/>"#.to_string()
            ),
            (ContentKind::Text, "<p>Growth</p>".to_string()),
        ]
    );
}

#[test]
fn test_mailgun_issue() {
    let html = r#"<table><tr><td class="header-logo"><img src="logo.png"></td></tr>
        <tr><td class="post-content">
          <h2>Notes</h2>
          <p>Plain paragraph.</p>
          <table class="img-container"><tr><td><img src="p.png"><p class="img-caption">A caption</p></td></tr></table>
          <table class="button"><tr><td><a href="/s">Subscribe</a></td></tr></table>
        </td></tr></table>"#;
    let parsed = Processor::default()
        .process_html(html, &info("Mailgun"), Template::Mailgun)
        .unwrap();
    let speech = parsed.ssml_chunks.concat();
    assert!(speech.contains("<p><s>Notes</s></p>"));
    assert!(speech.contains("<p>Plain paragraph.</p>"));
    assert!(!speech.contains("Subscribe"));
    assert!(!speech.contains("caption"));
    assert_eq!(
        parsed.description_fragments,
        vec![
            "<h1>Mailgun</h1>",
            "<h2>Notes</h2>",
            "<p>Plain paragraph.</p>",
            r#"<img src="p.png"/>"#,
            "<p>A caption</p>",
        ]
    );
}

#[test]
fn test_substack_issue_with_video() {
    let html = r#"<div class="email-body"><div class="post">
        <div>
          <div class="meta-author-wrap"><span>Jane Writer</span></div>
          <p>Today's post.</p>
          <a class="youtube-wrap" href="https://www.youtube.com/watch?v=abcdefghijk"><img src="t.jpg"></a>
          <div><hr></div>
          <p class="button-wrapper"><a class="button primary" href="/subscribe"><span>Subscribe now</span></a></p>
        </div>
    </div></div>"#;
    let lookup = |id: &str| -> Result<VideoMetadata, LookupError> {
        if id == "abcdefghijk" {
            Ok(VideoMetadata {
                title: "A talk".into(),
                author: "A Speaker".into(),
            })
        } else {
            Err(format!("unknown video {id}").into())
        }
    };
    let processor = Processor::default().with_video_lookup(&lookup);
    let parsed = processor
        .process_html(html, &info("Substack"), Template::Substack)
        .unwrap();
    let speech = parsed.ssml_chunks.concat();
    assert_eq!(
        speech,
        "<speak><p>Today's post.</p><p><s>YouTube video 'A talk' by A Speaker</s></p></speak>"
    );
}

#[test]
fn test_techcrunch_issue() {
    let story = |inner: &str| {
        format!(
            "<table><tr><td><table><tr><td><table><tr><td>{inner}</td></tr></table></td></tr></table></td></tr></table>"
        )
    };
    let html = format!(
        "<table>\
           <tr><td><table>\
             <tr><td><img src=\"tc.png\" alt=\"TechCrunch\"></td></tr>\
             <tr><td><h1>Week in Review</h1></td></tr>\
             <tr><td><p>Anthony Ha \u{2022} June 1, 2024</p></td></tr>\
           </table></td></tr>\
           <tr><td>{}</td></tr>\
           <tr><td>{}</td></tr>\
           <tr><td><table><tr><td><p>a</p><p>Privacy Policy</p><p>c</p></td></tr></table></td></tr>\
         </table>",
        story("<h3>Sponsored by Acme</h3><p>Buy widgets</p>"),
        story("<h3>Robots are here</h3><p>They fold laundry now.</p><p><a href=\"https://tc.example/r\">Read more</a></p>"),
    );
    let parsed = Processor::default()
        .process_html(&html, &info("Week in Review"), Template::TechCrunch)
        .unwrap();
    let speech = parsed.ssml_chunks.concat();
    assert_eq!(
        speech,
        "<speak>\
         <p>Week in Review</p><p>Anthony Ha; June 1, 2024</p><break time=\"750ms\" />\
         <break time=\"500ms\" /><p><s>Robots are here</s></p>\
         <p>They fold laundry now.</p>\
         </speak>"
    );
    assert!(parsed.description_fragments.contains(&"<h2>Week in Review</h2>".to_string()));
    assert!(!parsed.combined_description().contains("Acme"));
    assert!(!parsed.combined_description().contains("Privacy"));
}

#[test]
fn test_generic_issue() {
    let html = r#"<html><body>
        <p><a href="https://example.com/web">View this email in your browser</a></p>
        <center><table><tr><td>
          <h1>The Digest</h1>
          <div><p>Story one.</p></div>
          <blockquote><p>A wise quote.</p></blockquote>
        </td></tr></table></center>
        <p>Copyright 2024 The Digest</p>
        <p>Mailing address</p>
    </body></html>"#;
    let speech = speech_of(html, Template::Generic);
    assert_eq!(
        speech,
        "<speak><break time=\"750ms\" /><p><s>The Digest</s></p>\
         <p>Story one.</p>\
         <p>Quote.</p><p>A wise quote.</p><p>End quote.</p></speak>"
    );
}
