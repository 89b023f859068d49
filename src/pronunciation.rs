//! Pronunciation guide applied to speech before chunking.
//!
//! Each entry rewrites a surface word into a `<phoneme>` annotation. Entries
//! apply in order; a word annotated by an earlier entry is not touched by a
//! later one because `replace_text` does not descend into `<phoneme>`.

use serde::{Deserialize, Serialize};

use crate::ssml::SsmlNode;
use crate::ssml::tags::{self, PhoneticAlphabet};

/// One surface-text to phoneme mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationEntry {
    /// Text to look for in speech.
    pub text: String,
    /// Match ASCII letters regardless of case.
    #[serde(default)]
    pub ignore_case: bool,
    #[serde(default)]
    pub alphabet: PhoneticAlphabet,
    /// Phoneme string in `alphabet`.
    pub phoneme: String,
}

impl PronunciationEntry {
    pub fn new(text: &str, ignore_case: bool, alphabet: PhoneticAlphabet, phoneme: &str) -> Self {
        Self {
            text: text.to_string(),
            ignore_case,
            alphabet,
            phoneme: phoneme.to_string(),
        }
    }

    fn apply(&self, node: &SsmlNode) -> SsmlNode {
        let build = |surface: &str| tags::phoneme(surface, self.alphabet, &self.phoneme);
        node.replace_text(&self.text, &build, self.ignore_case)
    }
}

/// Built-in entries for words speech engines commonly get wrong.
pub fn default_entries() -> Vec<PronunciationEntry> {
    vec![
        PronunciationEntry::new("Substack", true, PhoneticAlphabet::Ipa, "ˈsʌbstæk"),
        PronunciationEntry::new("SaaS", false, PhoneticAlphabet::Ipa, "sæs"),
        PronunciationEntry::new("GIF", false, PhoneticAlphabet::Ipa, "ɡɪf"),
    ]
}

/// Ordered list of pronunciation entries.
#[derive(Debug, Clone, Default)]
pub struct PronunciationGuide {
    entries: Vec<PronunciationEntry>,
}

impl PronunciationGuide {
    pub fn new(entries: Vec<PronunciationEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PronunciationEntry] {
        &self.entries
    }

    /// Return a copy of `node` with every entry applied.
    pub fn apply(&self, node: &SsmlNode) -> SsmlNode {
        self.entries
            .iter()
            .fold(node.clone(), |acc, entry| entry.apply(&acc))
    }
}
