//! Embedded tweet fixtures as they arrive from Substack, both straight from
//! the platform and after a Gmail forward.

use mailcast::content::Variant;
use mailcast::dom::parse_html;
use mailcast::tweet::{BrokenTweet, Tweet, decompose, is_tweet};
use mailcast::{DocumentInfo, Processor, Template};

const DIRECT_TWEET: &str = r#"
<div class="tweet" data-attrs="{}">
  <a class="tweet-link-top" href="https://twitter.com/rustlang/status/1">
    <div class="tweet-header">
      <img class="tweet-header-avatar" src="avatar.jpg" alt="Twitter avatar for @rustlang">
      <div class="tweet-header-text">
        <span class="tweet-author-name">Rust Language </span>
        <span class="tweet-author-handle">@rustlang</span>
      </div>
    </div>
  </a>
  <div class="tweet-text">Rust 1.80 is out! Read all about it https://t.co/xyz</div>
  <a class="expanded-link" href="https://blog.rust-lang.org/">
    <img class="expanded-link-img" src="card.png">
    <div class="expanded-link-description">
      <h2 class="expanded-link-title">Announcing Rust 1.80</h2>
      <div class="expanded-link-domain">blog.rust-lang.org</div>
    </div>
  </a>
  <a class="tweet-link-bottom" href="https://twitter.com/rustlang/status/1">
    <div class="tweet-footer">
      <span class="tweet-date">12:00 PM &#8729; Jul 25, 2024</span>
      <span class="retweets"><span>1,024 Retweets</span></span>
      <span class="likes"><span>4,096 Likes</span></span>
    </div>
  </a>
</div>"#;

const FORWARDED_QUOTE_TWEET: &str = r#"
<div>
  <table><tr><td>
    <div>
      <img src="avatar.jpg" alt="Twitter avatar for @ferris">
      <span>Ferris</span> <span>@ferris</span>
    </div>
    <p>Couldn&#8217;t agree more <span class="fake-link">#rustlang</span></p>
    <div>
      <p><span>Graydon</span><span>@graydon</span></p>
      <p>Memory safety without garbage collection.</p>
    </div>
    <p><span>10 Retweets</span> <span>99 Likes</span></p>
  </td></tr></table>
</div>"#;

fn speech(tweet: &Tweet) -> Vec<String> {
    tweet.speech().iter().map(ToString::to_string).collect()
}

#[test]
fn test_direct_regular_tweet() {
    let dom = parse_html(DIRECT_TWEET);
    let node = dom.body().find("div").unwrap();
    assert!(is_tweet(node));

    let tweet = decompose(node).unwrap();
    assert!(matches!(tweet, Tweet::Regular(_)));
    assert_eq!(
        speech(&tweet),
        vec![
            "<p><s>Tweet by @rustlang:</s><s>Rust 1.80 is out! Read all about it</s>\
             <s>Linking to: Announcing Rust 1.80.</s></p>"
        ]
    );
}

#[test]
fn test_forwarded_quote_tweet() {
    let dom = parse_html(FORWARDED_QUOTE_TWEET);
    let node = dom.body().find("div").unwrap();
    assert!(is_tweet(node));

    let tweet = decompose(node).unwrap();
    let Tweet::Quote(quote) = &tweet else {
        panic!("expected a quote tweet, got {tweet:?}");
    };
    assert_eq!(quote.author, "@ferris");
    assert_eq!(quote.quoted_author, "@graydon");
    assert_eq!(
        speech(&tweet),
        vec![
            "<p><s>Tweet by @ferris:</s><s>Couldn't agree more #rustlang</s></p>",
            "<p>To which @graydon replied:</p>",
            "<p>Memory safety without garbage collection.</p>",
        ]
    );
}

#[test]
fn test_tweet_without_footer_is_broken() {
    let dom = parse_html(
        r#"<div class="tweet"><div class="tweet-header"><span>@a</span></div><p>one</p><p>two</p></div>"#,
    );
    assert_eq!(
        decompose(dom.body().find("div").unwrap()),
        Err(BrokenTweet::MissingFooter)
    );
}

#[test]
fn test_broken_tweet_speaks_placeholder() {
    let html = r#"<div class="post"><div>
        <p>Before</p>
        <div class="tweet"><p>just text</p></div>
    </div></div>"#;
    let dom = parse_html(html);
    let info = DocumentInfo::default();
    let sections = Processor::default().inspect(&dom, &info, Template::Substack);
    let tweet = sections
        .iter()
        .find(|s| s.rule == "substack.Tweet")
        .unwrap();
    assert_eq!(tweet.speech, vec!["<p>Broken tweet: Fix me.</p>"]);
    assert_eq!(tweet.description.len(), 1);
}

#[test]
fn test_tweet_item_in_substack_post() {
    let html = format!(r#"<div class="post"><div><p>Big release today.</p>{DIRECT_TWEET}</div></div>"#);
    let dom = parse_html(&html);
    let info = DocumentInfo::default();
    let ctx = mailcast::content::Context::new(
        &info,
        &mailcast::NoVideoLookup,
        Template::Substack.families(),
    );
    let items: Vec<_> = Template::Substack.emit(dom.root(), &ctx).collect();
    assert_eq!(items.len(), 2);
    assert!(matches!(items[1].variant(), Variant::Tweet(Ok(Tweet::Regular(_)))));
}
