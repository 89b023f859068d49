//! Conversion settings.
//!
//! Settings load from JSON; every field is optional and falls back to the
//! defaults below.
//!
//! ```json
//! {
//!   "speech_limit": 4500,
//!   "description_limit": 16000,
//!   "pronunciation": [{ "text": "Substack", "ignore_case": true, "phoneme": "ˈsʌbstæk" }],
//!   "templates": { "techcrunch.com": "techcrunch", "ghost.io": "ghost" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::emitter::Template;
use crate::error::{Error, Result};
use crate::pronunciation::{PronunciationEntry, PronunciationGuide, default_entries};
use crate::ssml::SPEAK_ENVELOPE_LEN;

/// Default upper bound on one serialized `<speak>` chunk.
pub const DEFAULT_SPEECH_LIMIT: usize = 4500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum serialized length of one speech chunk.
    pub speech_limit: usize,
    /// Maximum length of the newline-joined description, if any.
    pub description_limit: Option<usize>,
    /// Pronunciation entries, applied in order.
    pub pronunciation: Vec<PronunciationEntry>,
    /// Sender domain to template family.
    pub templates: BTreeMap<String, Template>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech_limit: DEFAULT_SPEECH_LIMIT,
            description_limit: None,
            pronunciation: default_entries(),
            templates: BTreeMap::from([
                ("techcrunch.com".to_string(), Template::TechCrunch),
                ("substack.com".to_string(), Template::Substack),
            ]),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject settings no document could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.speech_limit <= SPEAK_ENVELOPE_LEN {
            return Err(Error::Config(format!(
                "speech_limit {} leaves no room inside <speak></speak>",
                self.speech_limit
            )));
        }
        for entry in &self.pronunciation {
            if entry.text.is_empty() {
                return Err(Error::Config("pronunciation entry with empty text".into()));
            }
            if entry.phoneme.trim().is_empty() {
                return Err(Error::Config(format!(
                    "pronunciation entry {:?} has an empty phoneme",
                    entry.text
                )));
            }
        }
        Ok(())
    }

    pub fn guide(&self) -> PronunciationGuide {
        PronunciationGuide::new(self.pronunciation.clone())
    }

    pub fn selector(&self) -> TemplateSelector<'_> {
        TemplateSelector::new(&self.templates)
    }
}

/// Picks a template family from a sender address.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSelector<'c> {
    domains: &'c BTreeMap<String, Template>,
}

impl<'c> TemplateSelector<'c> {
    pub fn new(domains: &'c BTreeMap<String, Template>) -> Self {
        Self { domains }
    }

    /// Template for `sender`, e.g. `"TechCrunch <newsletters@techcrunch.com>"`.
    ///
    /// Parent domains are tried in turn, so `news.example.com` matches an
    /// entry for `example.com`. Unknown senders get [`Template::Generic`].
    pub fn select(&self, sender: &str) -> Template {
        let domain = sender_domain(sender);
        let mut candidate = domain.as_str();
        loop {
            if let Some(template) = self.domains.get(candidate) {
                log::debug!("sender domain {domain} uses the {template} template");
                return *template;
            }
            match candidate.split_once('.') {
                Some((_, parent)) if parent.contains('.') => candidate = parent,
                _ => break,
            }
        }
        log::debug!("no template registered for {domain:?}, using generic");
        Template::Generic
    }
}

/// Lower-cased domain after the last `@`, without a closing `>`.
fn sender_domain(sender: &str) -> String {
    let after_at = sender.rsplit('@').next().unwrap_or(sender);
    after_at
        .trim()
        .trim_end_matches('>')
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.speech_limit, 4500);
        assert_eq!(config.description_limit, None);
        assert!(!config.pronunciation.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json_str(r#"{"description_limit": 2000}"#).unwrap();
        assert_eq!(config.description_limit, Some(2000));
        assert_eq!(config.speech_limit, DEFAULT_SPEECH_LIMIT);
        assert_eq!(config.templates.get("techcrunch.com"), Some(&Template::TechCrunch));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Config::from_json_str(r#"{"speech_limit": 15}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{"pronunciation": [{"text": "GIF", "phoneme": " "}]}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"speech_limit": 1000, "templates": {{"ghost.io": "ghost"}}}}"#
        )
        .unwrap();
        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.speech_limit, 1000);
        assert_eq!(config.selector().select("a@ghost.io"), Template::Ghost);
        assert_eq!(config.selector().select("a@techcrunch.com"), Template::Generic);

        assert!(matches!(
            Config::from_path(file.path().with_extension("missing")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_selector() {
        let config = Config::default();
        let selector = config.selector();
        assert_eq!(
            selector.select("TechCrunch <Newsletters@TechCrunch.com>"),
            Template::TechCrunch
        );
        assert_eq!(selector.select("writer@mail.substack.com"), Template::Substack);
        assert_eq!(selector.select("someone@example.com"), Template::Generic);
        assert_eq!(selector.select("no address"), Template::Generic);
        assert_eq!(selector.select("x@com"), Template::Generic);
    }
}
