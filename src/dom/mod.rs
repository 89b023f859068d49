//! HTML parsing into a read-only arena DOM.
//!
//! Newsletters are parsed once with html5ever into a [`Dom`]. Everything
//! downstream reads the tree through [`NodeRef`] and never mutates it.

mod arena;
mod node_ref;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, Children, Dom, Node, NodeData, NodeId};
pub use node_ref::{Descendants, NodeRef};
pub use serialize::{ALLOWED_ATTRIBUTES, write_filtered};
pub use tree_sink::{DomSink, SinkHandle};

use html5ever::ParseOpts;
use html5ever::tendril::TendrilSink;

use crate::util::decode_html;

/// Parse an HTML string into a [`Dom`].
///
/// Parsing never fails: html5ever recovers from any malformed input the same
/// way a browser would.
pub fn parse_html(html: &str) -> Dom {
    let sink = html5ever::parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    let dom = sink.into_dom();
    log::debug!("parsed {} bytes of html into {} nodes", html.len(), dom.len());
    dom
}

/// Parse raw HTML bytes, detecting the encoding first.
///
/// See [`decode_html`] for the detection order.
pub fn parse_html_bytes(bytes: &[u8]) -> Dom {
    parse_html(&decode_html(bytes))
}
