//! Speech Synthesis Markup Language trees.
//!
//! [`SsmlNode`] is the only representation of speech in the crate. Content
//! items build trees with the constructors in [`tags`], the pronunciation
//! guide rewrites them with [`SsmlNode::replace_text`], and the chunker
//! serializes them with `Display`.
//!
//! ```
//! use mailcast::ssml::tags;
//!
//! let speech = tags::speak(vec![tags::pause_ms(750), tags::ps_text("Hello & welcome")]);
//! assert_eq!(
//!     speech.to_string(),
//!     r#"<speak><break time="750ms" /><p><s>Hello &amp; welcome</s></p></speak>"#
//! );
//! ```

mod node;
pub mod tags;

pub use node::{Element, SsmlNode};

/// Serialized length of an empty `<speak></speak>` envelope.
pub const SPEAK_ENVELOPE_LEN: usize = "<speak></speak>".len();
