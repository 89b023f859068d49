//! Cached regex patterns.
//!
//! Uses LazyLock to compile patterns once on first use.

use regex_lite::Regex;
use std::sync::LazyLock;

// === Input decoding ===

/// Matches `<meta charset="...">` and `<meta http-equiv content="...; charset=...">`
pub static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?([A-Za-z0-9_:.\-]+)"#).unwrap()
});

// === Tweets ===

/// Span text of a tweet footer's retweet counter
pub static RETWEETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\sRetweets").unwrap());

/// Span text of a tweet footer's like counter
pub static LIKES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d*\sLikes").unwrap());

/// Bare short-link URLs that tweets append to their text
pub static SHORT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:t\.co|bit\.ly|buff\.ly|pic\.twitter\.com)/\S+").unwrap()
});

// === Video ===

/// Video id inside a YouTube watch, short or embed URL
pub static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[?&]v=|youtu\.be/|/embed/|/shorts/)([A-Za-z0-9_-]{6,})").unwrap()
});

/// `"videoId":"..."` inside a data attribute blob
pub static VIDEO_ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""video_?[iI]d"\s*:\s*"([A-Za-z0-9_-]{6,})""#).unwrap()
});

// === Prosody ===

/// Relative speaking rate, e.g. `80%`
pub static PROSODY_RATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+%$").unwrap());

/// Relative pitch, e.g. `+5%` or `-2.5%`
pub static PROSODY_PITCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+|\-)+\d+(\.\d+)*%$").unwrap());

/// Relative volume, e.g. `+6dB`
pub static PROSODY_VOLUME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+|\-)+\d+(\.\d)?dB$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_charset_forms() {
        let a = META_CHARSET_RE.captures(r#"<meta charset="ISO-8859-1">"#).unwrap();
        assert_eq!(&a[1], "ISO-8859-1");
        let b = META_CHARSET_RE
            .captures(r#"<META http-equiv="Content-Type" content="text/html; charset=windows-1252">"#)
            .unwrap();
        assert_eq!(&b[1], "windows-1252");
    }

    #[test]
    fn test_youtube_ids() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=3",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
        ] {
            let caps = YOUTUBE_ID_RE.captures(url).unwrap();
            assert_eq!(&caps[1], "dQw4w9WgXcQ", "{url}");
        }
    }

    #[test]
    fn test_tweet_counters() {
        assert!(RETWEETS_RE.is_match("12 Retweets"));
        assert!(LIKES_RE.is_match(" Likes"));
        assert!(!LIKES_RE.is_match("Liked by 12"));
    }

    #[test]
    fn test_prosody_values() {
        assert!(PROSODY_RATE_RE.is_match("80%"));
        assert!(PROSODY_PITCH_RE.is_match("-2.5%"));
        assert!(!PROSODY_PITCH_RE.is_match("2%"));
        assert!(PROSODY_VOLUME_RE.is_match("+6dB"));
        assert!(!PROSODY_VOLUME_RE.is_match("6db"));
    }
}
