//! # mailcast
//!
//! Turn HTML newsletters into speech and a podcast-style description.
//!
//! ## Features
//!
//! - Recognises Ghost, Mailgun, Substack and TechCrunch layouts, with a
//!   generic fallback for everything else
//! - Splits speech into complete `<speak>` documents under a size limit
//! - Applies a configurable pronunciation guide with `<phoneme>` tags
//! - Builds a sanitized HTML description that shrinks to fit a budget
//!
//! ## Quick Start
//!
//! ```
//! use mailcast::{DocumentInfo, Processor, Template};
//!
//! let html = "<html><body><h1>Weekly notes</h1><p>Hello, listeners.</p></body></html>";
//! let info = DocumentInfo {
//!     title: "Weekly notes".into(),
//!     ..DocumentInfo::default()
//! };
//!
//! let parsed = Processor::default()
//!     .process_html(html, &info, Template::Generic)
//!     .unwrap();
//! assert_eq!(parsed.ssml_chunks.len(), 1);
//! assert!(parsed.ssml_chunks[0].contains("<p>Hello, listeners.</p>"));
//! assert_eq!(parsed.description_fragments[0], "<h1>Weekly notes</h1>");
//! ```
//!
//! ## How it works
//!
//! The HTML is parsed into an arena [`dom`]. An [`emitter`] for the chosen
//! [`Template`] finds the content region and yields each node classified
//! into a [`ContentItem`](content::ContentItem) by the family's rule list.
//! Items render themselves as [`ssml`] trees and [`description`] fragments;
//! the [`pipeline`] chunks the speech and fits the description.

pub mod config;
pub mod content;
pub mod description;
pub mod dom;
pub mod emitter;
pub mod error;
mod patterns;
pub mod pipeline;
pub mod pronunciation;
pub mod ssml;
pub mod text;
pub mod tweet;
pub mod util;

pub use config::{Config, TemplateSelector};
pub use content::{DocumentInfo, NoVideoLookup, VideoMetadata, VideoMetadataLookup};
pub use emitter::Template;
pub use error::{Error, Result};
pub use pipeline::{ParsedItem, Processor, Section};
