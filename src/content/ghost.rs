//! Rules for Ghost newsletters.
//!
//! Ghost marks its cards with `kg-*` classes. Everything promotional
//! (call-to-action and button cards, paywalls, visibility wrappers, feedback
//! buttons, footers) is skipped; image cards keep their image and caption.

use super::{Context, Rule, SkipReason, Variant, figure_image, skip_cta, skip_footer, skip_rule};
use crate::dom::NodeRef;

pub const RULES: &[Rule] = &[
    Rule {
        name: "ghost.CtaCard",
        matches: is_cta_card,
        build: skip_cta,
    },
    Rule {
        name: "ghost.Paywall",
        matches: is_paywall,
        build: paywall,
    },
    Rule {
        name: "ghost.FeedbackButtons",
        matches: is_feedback_buttons,
        build: skip_cta,
    },
    Rule {
        name: "ghost.Footer",
        matches: is_footer,
        build: skip_footer,
    },
    Rule {
        name: "ghost.FooterPowered",
        matches: is_footer_powered,
        build: skip_footer,
    },
    Rule {
        name: "ghost.HorizontalRule",
        matches: is_horizontal_rule,
        build: skip_rule,
    },
    Rule {
        name: "ghost.VisibilityWrapper",
        matches: is_visibility_wrapper,
        build: visibility_wrapper,
    },
    Rule {
        name: "ghost.ButtonCard",
        matches: is_button_card,
        build: skip_cta,
    },
    Rule {
        name: "ghost.ImageCard",
        matches: is_image_card,
        build: figure_image,
    },
];

fn is_cta_card(node: NodeRef<'_>) -> bool {
    node.is("table") && node.has_class("kg-cta-card")
}

fn is_paywall(node: NodeRef<'_>) -> bool {
    node.is("div") && node.has_class("kg-paywall")
}

fn paywall<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::Paywall)
}

fn is_feedback_buttons(node: NodeRef<'_>) -> bool {
    node.is("table") && node.has_class("feedback-buttons")
}

fn is_footer(node: NodeRef<'_>) -> bool {
    node.is("td") && node.has_class("footer")
}

fn is_footer_powered(node: NodeRef<'_>) -> bool {
    node.is("td") && node.has_class("footer-powered")
}

fn is_horizontal_rule(node: NodeRef<'_>) -> bool {
    node.is("table") && node.has_class("kg-hr-card")
}

fn is_visibility_wrapper(node: NodeRef<'_>) -> bool {
    node.is("div") && node.has_class("kg-visibility-wrapper")
}

fn visibility_wrapper<'a>(_: NodeRef<'a>, _: &Context<'a>) -> Variant<'a> {
    Variant::Skipped(SkipReason::VisibilityWrapper)
}

fn is_button_card(node: NodeRef<'_>) -> bool {
    node.is("table") && node.has_class("kg-button-card")
}

fn is_image_card(node: NodeRef<'_>) -> bool {
    node.is("div") && node.has_class("kg-image-card")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Caption, DocumentInfo, NoVideoLookup, generic};
    use crate::dom::parse_html;

    const FAMILY: &[&[Rule]] = &[RULES, generic::RULES];

    #[test]
    fn test_promotional_cards_are_skipped() {
        let dom = parse_html(
            r#"<table class="kg-card kg-cta-card"><tr><td><p>Upgrade now</p></td></tr></table>
               <div class="kg-paywall"><p>Members only</p></div>
               <table class="feedback-buttons"><tr><td>Like</td></tr></table>
               <table class="kg-card kg-hr-card"><tr><td><hr></td></tr></table>
               <div class="kg-visibility-wrapper"><p>Hidden</p></div>
               <table class="kg-card kg-button-card"><tr><td><a href="/">Go</a></td></tr></table>"#,
        );
        let info = DocumentInfo::default();
        let ctx = Context::new(&info, &NoVideoLookup, FAMILY);
        let names: Vec<_> = dom
            .body()
            .element_children()
            .map(|n| ctx.classify(n))
            .inspect(|item| {
                assert!(item.speech().is_empty());
                assert!(item.description().is_empty());
            })
            .map(|item| item.rule())
            .collect();
        assert_eq!(
            names,
            vec![
                "ghost.CtaCard",
                "ghost.Paywall",
                "ghost.FeedbackButtons",
                "ghost.HorizontalRule",
                "ghost.VisibilityWrapper",
                "ghost.ButtonCard",
            ]
        );
    }

    #[test]
    fn test_footers_are_skipped() {
        let dom = parse_html(
            r#"<table><tr><td class="footer">Unsubscribe</td><td class="footer-powered">Powered by Ghost</td></tr></table>"#,
        );
        let info = DocumentInfo::default();
        let ctx = Context::new(&info, &NoVideoLookup, FAMILY);
        let cells: Vec<_> = dom.body().find_all("td").collect();
        assert_eq!(ctx.classify(cells[0]).rule(), "ghost.Footer");
        assert_eq!(ctx.classify(cells[1]).rule(), "ghost.FooterPowered");
    }

    #[test]
    fn test_image_card_with_caption() {
        let dom = parse_html(
            r#"<div class="kg-card kg-image-card kg-card-hascaption">
                 <img src="https://ghost.example/a.jpg" class="kg-image" alt="A chart">
                 <figcaption class="kg-card-figcaption">Revenue <b>up</b></figcaption>
               </div>"#,
        );
        let info = DocumentInfo::default();
        let ctx = Context::new(&info, &NoVideoLookup, FAMILY);
        let item = ctx.classify(dom.body().find("div").unwrap());
        assert_eq!(item.rule(), "ghost.ImageCard");
        assert!(item.speech().is_empty());
        assert!(matches!(
            item.variant(),
            Variant::Image { caption: Some(Caption::Text(t)), .. } if t == "Revenue up"
        ));

        let rendered: Vec<_> = item.description().iter().map(|d| d.render(false)).collect();
        assert_eq!(
            rendered,
            vec![
                r#"<img src="https://ghost.example/a.jpg" alt="A chart"/>"#,
                "<p>Revenue up</p>"
            ]
        );
    }
}
