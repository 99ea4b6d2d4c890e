//! Video codec classification and MIME strings

use std::fmt;

/// Video codecs recognized in ffmpeg's stream description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Av1,
    Vp9,
    Vvc,
    Unknown,
}

impl Codec {
    /// Classify from ffmpeg diagnostic text. First match wins, av1 before
    /// vp9 before vvc.
    pub fn detect(diagnostics: &str) -> Self {
        if diagnostics.contains("Video: av1") {
            Codec::Av1
        } else if diagnostics.contains("Video: vp9") {
            Codec::Vp9
        } else if diagnostics.contains("Video: vvc") {
            Codec::Vvc
        } else {
            Codec::Unknown
        }
    }

    /// MIME string written to `video_mime_type`
    pub fn mime_type(self) -> &'static str {
        match self {
            Codec::Av1 => "video/av1",
            Codec::Vp9 => "video/mp4; codecs=\"vp09\"",
            Codec::Vvc => "video/mp4; codecs=\"vvc\"",
            Codec::Unknown => "unknown",
        }
    }

    /// Classify a MIME string back into a codec family.
    pub fn from_mime_type(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("av1") {
            Codec::Av1
        } else if mime.contains("vvc") {
            Codec::Vvc
        } else if mime.contains("vp09") {
            Codec::Vp9
        } else {
            Codec::Unknown
        }
    }

    /// Short family name used in titles, `None` for unknown codecs
    pub fn family(self) -> Option<&'static str> {
        match self {
            Codec::Av1 => Some("av1"),
            Codec::Vp9 => Some("vp9"),
            Codec::Vvc => Some("vvc"),
            Codec::Unknown => None,
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family().unwrap_or("unknown"))
    }
}
