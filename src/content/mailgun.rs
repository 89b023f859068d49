//! Rules for Mailgun-sent newsletters.

use super::{Caption, Context, Rule, SkipReason, Variant, skip_cta, skip_footer};
use crate::dom::NodeRef;

pub const RULES: &[Rule] = &[
    Rule {
        name: "mailgun.SubscribeButton",
        matches: is_subscribe_button,
        build: skip_cta,
    },
    Rule {
        name: "mailgun.CaptionedImage",
        matches: is_captioned_image,
        build: captioned_image,
    },
    Rule {
        name: "mailgun.HeaderLogo",
        matches: is_header_logo,
        build: header_logo,
    },
    Rule {
        name: "mailgun.Footer",
        matches: is_footer,
        build: skip_footer,
    },
];

fn is_subscribe_button(node: NodeRef<'_>) -> bool {
    (node.is("table") && node.has_class("button"))
        || (node.is("td") && node.has_class("subscribe-button-inner"))
}

fn is_captioned_image(node: NodeRef<'_>) -> bool {
    node.is("table") && node.has_class("img-container")
}

fn captioned_image<'a>(node: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    let caption = node
        .find_where(|n| n.is("p") && n.has_class("img-caption"))
        .map(Caption::Node);
    Variant::Image {
        image: node.find("img"),
        caption,
    }
}

fn is_header_logo(node: NodeRef<'_>) -> bool {
    node.is("td") && node.has_class("header-logo")
}

fn header_logo<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::Logo)
}

fn is_footer(node: NodeRef<'_>) -> bool {
    node.is("td") && node.has_class("footer")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DocumentInfo, NoVideoLookup, generic};
    use crate::description::ContentKind;
    use crate::dom::parse_html;

    const FAMILY: &[&[Rule]] = &[RULES, generic::RULES];

    #[test]
    fn test_captioned_image() {
        let dom = parse_html(
            r#"<table class="img-container"><tr><td>
                 <img src="https://cdn.example/photo.png" width="600">
                 <p class="img-caption">Photo: <a href="https://credit.example">Jane</a></p>
               </td></tr></table>"#,
        );
        let info = DocumentInfo::default();
        let ctx = Context::new(&info, &NoVideoLookup, FAMILY);
        let item = ctx.classify(dom.body().find("table").unwrap());
        assert_eq!(item.rule(), "mailgun.CaptionedImage");

        let description = item.description();
        let kinds: Vec<_> = description.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, vec![ContentKind::Image, ContentKind::Text]);
        assert_eq!(
            description[1].render(true),
            "<p>Photo: <a>Jane</a></p>"
        );
    }

    #[test]
    fn test_subscribe_logo_and_footer() {
        let dom = parse_html(
            r#"<table class="button"><tr><td class="subscribe-button-inner"><a>Subscribe</a></td></tr></table>
               <table><tr><td class="header-logo"><img src="logo.png"></td><td class="footer">Bye</td></tr></table>"#,
        );
        let info = DocumentInfo::default();
        let ctx = Context::new(&info, &NoVideoLookup, FAMILY);
        let body = dom.body();
        assert_eq!(
            ctx.classify(body.find("table").unwrap()).rule(),
            "mailgun.SubscribeButton"
        );
        let names: Vec<_> = body.find_all("td").map(|td| ctx.classify(td).rule()).collect();
        assert_eq!(
            names,
            vec!["mailgun.SubscribeButton", "mailgun.HeaderLogo", "mailgun.Footer"]
        );
    }
}
