//! Typed constructors for the SSML subset common to Google and Amazon voices.
//!
//! Constructors whose arguments can be invalid return [`Result`]; the rest
//! build their element directly.

use serde::{Deserialize, Serialize};

use super::node::{Element, SsmlNode};
use crate::error::{Error, Result};
use crate::patterns::{PROSODY_PITCH_RE, PROSODY_RATE_RE, PROSODY_VOLUME_RE};

/// Voice names accepted by [`voice`].
pub const SUPPORTED_VOICES: &[&str] = &[
    "en-US-Wavenet-A",
    "en-US-Wavenet-B",
    "en-US-Wavenet-C",
    "en-US-Wavenet-D",
    "en-US-Wavenet-E",
    "en-US-Wavenet-F",
    "en-US-Wavenet-G",
    "en-US-Wavenet-H",
    "en-US-Wavenet-I",
    "en-US-Wavenet-J",
    "en-GB-Wavenet-A",
    "en-GB-Wavenet-B",
    "en-GB-Wavenet-F",
];

const RATE_KEYWORDS: &[&str] = &["x-slow", "slow", "medium", "fast", "x-fast"];
const PITCH_KEYWORDS: &[&str] = &["x-low", "low", "medium", "high", "x-high"];
const VOLUME_KEYWORDS: &[&str] = &["silent", "x-soft", "soft", "medium", "loud", "x-loud"];

/// Literal text leaf.
pub fn text(value: impl Into<String>) -> SsmlNode {
    SsmlNode::Text(value.into())
}

fn wrap(name: &'static str, children: Vec<SsmlNode>) -> SsmlNode {
    Element::new(name).children(children).into()
}

/// Root `<speak>` element.
pub fn speak(children: Vec<SsmlNode>) -> SsmlNode {
    wrap("speak", children)
}

/// `<p>` paragraph.
pub fn p(children: Vec<SsmlNode>) -> SsmlNode {
    wrap("p", children)
}

/// `<s>` sentence.
pub fn s(children: Vec<SsmlNode>) -> SsmlNode {
    wrap("s", children)
}

/// Paragraph holding plain text.
pub fn p_text(value: impl Into<String>) -> SsmlNode {
    p(vec![text(value)])
}

/// Sentence holding plain text.
pub fn s_text(value: impl Into<String>) -> SsmlNode {
    s(vec![text(value)])
}

/// Paragraph holding a single sentence of plain text.
pub fn ps_text(value: impl Into<String>) -> SsmlNode {
    p(vec![s_text(value)])
}

/// `<break time="..."/>`, e.g. `pause("750ms")`.
pub fn pause(time: &str) -> SsmlNode {
    Element::new("break").attr("time", time).into()
}

/// Pause length in milliseconds.
pub fn pause_ms(ms: u32) -> SsmlNode {
    pause(&format!("{ms}ms"))
}

/// Relative pause strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakStrength {
    None,
    XWeak,
    Weak,
    Medium,
    Strong,
    XStrong,
}

impl BreakStrength {
    pub fn as_str(self) -> &'static str {
        match self {
            BreakStrength::None => "none",
            BreakStrength::XWeak => "x-weak",
            BreakStrength::Weak => "weak",
            BreakStrength::Medium => "medium",
            BreakStrength::Strong => "strong",
            BreakStrength::XStrong => "x-strong",
        }
    }
}

/// `<break strength="..."/>`.
pub fn pause_strength(strength: BreakStrength) -> SsmlNode {
    Element::new("break").attr("strength", strength.as_str()).into()
}

/// How a `<say-as>` span is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretAs {
    Currency,
    Telephone,
    Verbatim,
    SpellOut,
    Date,
    Characters,
    Cardinal,
    Ordinal,
    Fraction,
    Expletive,
    Beep,
    Unit,
    Time,
}

impl InterpretAs {
    pub fn as_str(self) -> &'static str {
        match self {
            InterpretAs::Currency => "currency",
            InterpretAs::Telephone => "telephone",
            InterpretAs::Verbatim => "verbatim",
            InterpretAs::SpellOut => "spell-out",
            InterpretAs::Date => "date",
            InterpretAs::Characters => "characters",
            InterpretAs::Cardinal => "cardinal",
            InterpretAs::Ordinal => "ordinal",
            InterpretAs::Fraction => "fraction",
            InterpretAs::Expletive => "expletive",
            InterpretAs::Beep => "beep",
            InterpretAs::Unit => "unit",
            InterpretAs::Time => "time",
        }
    }
}

fn say_as_element(interpret_as: InterpretAs, children: Vec<SsmlNode>) -> Element {
    Element::new("say-as")
        .attr("interpret-as", interpret_as.as_str())
        .children(children)
}

/// `<say-as interpret-as="...">`.
pub fn say_as(children: Vec<SsmlNode>, interpret_as: InterpretAs) -> SsmlNode {
    say_as_element(interpret_as, children).into()
}

/// Currency amount read in the given language, e.g. `en-US`.
pub fn say_as_currency(children: Vec<SsmlNode>, language: &str) -> SsmlNode {
    say_as_element(InterpretAs::Currency, children)
        .attr("language", language)
        .into()
}

/// Telephone number with optional format and Google style hint.
pub fn say_as_telephone(
    children: Vec<SsmlNode>,
    format: Option<&str>,
    style: Option<&str>,
) -> SsmlNode {
    say_as_element(InterpretAs::Telephone, children)
        .attr_opt("format", format)
        .attr_opt("google:style", style)
        .into()
}

/// Date with a field order such as `mdy` and a detail level.
pub fn say_as_date(children: Vec<SsmlNode>, format: &str, detail: &str) -> SsmlNode {
    say_as_element(InterpretAs::Date, children)
        .attr("format", format)
        .attr("detail", detail)
        .into()
}

/// Time of day with a format such as `hms12`.
pub fn say_as_time(children: Vec<SsmlNode>, format: &str) -> SsmlNode {
    say_as_element(InterpretAs::Time, children)
        .attr("format", format)
        .into()
}

/// Optional `<prosody>` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prosody {
    pub rate: Option<String>,
    pub pitch: Option<String>,
    pub volume: Option<String>,
}

/// `<prosody>` with validated attribute values.
///
/// Each value is either a keyword (`slow`, `x-high`, `loud`, ...) or a
/// relative value: `80%` for rate, `+5%` for pitch, `-6dB` for volume.
pub fn prosody(children: Vec<SsmlNode>, settings: &Prosody) -> Result<SsmlNode> {
    check_prosody("rate", settings.rate.as_deref(), RATE_KEYWORDS, |v| {
        PROSODY_RATE_RE.is_match(v)
    })?;
    check_prosody("pitch", settings.pitch.as_deref(), PITCH_KEYWORDS, |v| {
        PROSODY_PITCH_RE.is_match(v)
    })?;
    check_prosody("volume", settings.volume.as_deref(), VOLUME_KEYWORDS, |v| {
        PROSODY_VOLUME_RE.is_match(v)
    })?;

    Ok(Element::new("prosody")
        .attr_opt("rate", settings.rate.as_deref())
        .attr_opt("volume", settings.volume.as_deref())
        .attr_opt("pitch", settings.pitch.as_deref())
        .children(children)
        .into())
}

fn check_prosody(
    name: &str,
    value: Option<&str>,
    keywords: &[&str],
    relative: impl Fn(&str) -> bool,
) -> Result<()> {
    match value {
        Some(v) if !keywords.contains(&v) && !relative(v) => Err(Error::InvalidSsml(format!(
            "the {name} provided to prosody is not valid: {v:?}"
        ))),
        _ => Ok(()),
    }
}

/// `<sub alias="...">`: speak `alias` in place of the content.
pub fn sub(children: Vec<SsmlNode>, alias: &str) -> SsmlNode {
    Element::new("sub")
        .attr("alias", alias)
        .children(children)
        .into()
}

/// Emphasis strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisLevel {
    Strong,
    Moderate,
    None,
    Reduced,
}

impl EmphasisLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EmphasisLevel::Strong => "strong",
            EmphasisLevel::Moderate => "moderate",
            EmphasisLevel::None => "none",
            EmphasisLevel::Reduced => "reduced",
        }
    }
}

/// `<emphasis level="...">`.
pub fn emphasis(children: Vec<SsmlNode>, level: EmphasisLevel) -> SsmlNode {
    Element::new("emphasis")
        .attr("level", level.as_str())
        .children(children)
        .into()
}

/// Phonetic alphabet of a `<phoneme>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhoneticAlphabet {
    #[default]
    Ipa,
    XSampa,
}

impl PhoneticAlphabet {
    pub fn as_str(self) -> &'static str {
        match self {
            PhoneticAlphabet::Ipa => "ipa",
            PhoneticAlphabet::XSampa => "x-sampa",
        }
    }
}

/// `<phoneme alphabet="..." ph="...">` around the surface text.
pub fn phoneme(surface: &str, alphabet: PhoneticAlphabet, ph: &str) -> SsmlNode {
    Element::new("phoneme")
        .attr("alphabet", alphabet.as_str())
        .attr("ph", ph)
        .children(vec![text(surface)])
        .into()
}

/// Voice selection for [`voice`]: a named voice, or descriptive attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelection {
    Name(String),
    Attributes {
        language: Option<String>,
        gender: Option<String>,
        variant: Option<String>,
    },
}

/// `<voice>` switching to a named voice or to one matching attributes.
///
/// A name must be one of [`SUPPORTED_VOICES`]; attribute selection needs at
/// least one attribute.
pub fn voice(children: Vec<SsmlNode>, selection: &VoiceSelection) -> Result<SsmlNode> {
    let element = match selection {
        VoiceSelection::Name(name) => {
            if !SUPPORTED_VOICES.contains(&name.as_str()) {
                return Err(Error::InvalidSsml(format!("unsupported voice name {name:?}")));
            }
            Element::new("voice").attr("name", name.as_str())
        }
        VoiceSelection::Attributes {
            language,
            gender,
            variant,
        } => {
            if language.is_none() && gender.is_none() && variant.is_none() {
                return Err(Error::InvalidSsml(
                    "voice needs a name, language, gender or variant".into(),
                ));
            }
            Element::new("voice")
                .attr_opt("language", language.as_deref())
                .attr_opt("gender", gender.as_deref())
                .attr_opt("variant", variant.as_deref())
        }
    };
    Ok(element.children(children).into())
}

/// `<lang xml:lang="...">`.
pub fn lang(children: Vec<SsmlNode>, language: &str) -> SsmlNode {
    Element::new("lang")
        .attr("xml:lang", language)
        .children(children)
        .into()
}

/// Optional `<audio>` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioOptions {
    /// Spoken in place of the clip when it cannot be played.
    pub alt: Option<String>,
    /// `<desc>` text describing the clip.
    pub description: Option<String>,
    pub clip_begin: Option<String>,
    pub clip_end: Option<String>,
    pub speed: Option<String>,
    pub repeat_count: Option<String>,
    pub repeat_dur: Option<String>,
    pub sound_level: Option<String>,
}

/// `<audio src="...">`.
pub fn audio(src: &str, options: &AudioOptions) -> SsmlNode {
    let mut children = Vec::new();
    if let Some(description) = &options.description {
        children.push(wrap("desc", vec![text(description.as_str())]));
    }
    if let Some(alt) = &options.alt {
        children.push(text(alt.as_str()));
    }

    Element::new("audio")
        .attr("src", src)
        .attr_opt("clipBegin", options.clip_begin.as_deref())
        .attr_opt("clipEnd", options.clip_end.as_deref())
        .attr_opt("speed", options.speed.as_deref())
        .attr_opt("repeatCount", options.repeat_count.as_deref())
        .attr_opt("repeatDur", options.repeat_dur.as_deref())
        .attr_opt("soundLevel", options.sound_level.as_deref())
        .children(children)
        .into()
}

/// `<mark name="..."/>`.
pub fn mark(name: &str) -> SsmlNode {
    Element::new("mark").attr("name", name).into()
}

/// `<par>`: children play in parallel.
pub fn par(children: Vec<SsmlNode>) -> SsmlNode {
    wrap("par", children)
}

/// `<seq>`: children play one after another.
pub fn seq(children: Vec<SsmlNode>) -> SsmlNode {
    wrap("seq", children)
}

/// Optional `<media>` timing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaOptions {
    pub xml_id: Option<String>,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub repeat_count: Option<String>,
    pub repeat_dur: Option<String>,
    pub sound_level: Option<String>,
    pub fade_in_dur: Option<String>,
    pub fade_out_dur: Option<String>,
}

/// `<media>` wrapping a single `<audio>` or `<speak>` element.
pub fn media(content: SsmlNode, options: &MediaOptions) -> Result<SsmlNode> {
    if !content.is_tag("audio") && !content.is_tag("speak") {
        return Err(Error::InvalidSsml(
            "only audio and speak elements are allowed in media".into(),
        ));
    }

    Ok(Element::new("media")
        .attr_opt("xml:id", options.xml_id.as_deref())
        .attr_opt("begin", options.begin.as_deref())
        .attr_opt("end", options.end.as_deref())
        .attr_opt("repeatCount", options.repeat_count.as_deref())
        .attr_opt("repeatDur", options.repeat_dur.as_deref())
        .attr_opt("soundLevel", options.sound_level.as_deref())
        .attr_opt("fadeInDur", options.fade_in_dur.as_deref())
        .attr_opt("fadeOutDur", options.fade_out_dur.as_deref())
        .children(vec![content])
        .into())
}
