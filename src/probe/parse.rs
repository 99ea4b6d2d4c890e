//! Field extraction from ffmpeg's diagnostic output
//!
//! Pure functions over captured text; no process handling here.

use super::codec::Codec;

// helper.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Frame rate value when none could be parsed
pub const UNKNOWN_FRAME_RATE: &str = "unknown";

/// Video properties scraped from the inspector output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub codec: Codec,
    pub duration_ms: Option<u64>,
    /// `WIDTHXHEIGHT`
    pub resolution: Option<String>,
    pub frame_rate: String,
}

impl VideoDetails {
    /// Every field unknown; used when the inspector could not run.
    pub fn unknown() -> Self {
        Self {
            codec: Codec::Unknown,
            duration_ms: None,
            resolution: None,
            frame_rate: UNKNOWN_FRAME_RATE.to_string(),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.codec.mime_type()
    }
}

/// Extract codec, duration, resolution and frame rate from diagnostic text.
pub fn parse_diagnostics(text: &str) -> VideoDetails {
    VideoDetails {
        codec: Codec::detect(text),
        duration_ms: parse_duration_ms(text),
        resolution: parse_resolution(text),
        frame_rate: parse_frame_rate(text).unwrap_or_else(|| UNKNOWN_FRAME_RATE.to_string()),
    }
}

/// `Duration: HH:MM:SS.CC` to milliseconds.
pub fn parse_duration_ms(text: &str) -> Option<u64> {
    let caps = regex!(r"Duration: (\d{2}):(\d{2}):(\d{2})\.(\d{2})").captures(text)?;
    let num = |i: usize| caps[i].parse::<u64>().ok();
    let (hours, minutes, seconds, centis) = (num(1)?, num(2)?, num(3)?, num(4)?);
    Some((hours * 3600 + minutes * 60 + seconds) * 1000 + centis * 10)
}

/// `, WIDTHxHEIGHT,` to `WIDTHXHEIGHT`.
pub fn parse_resolution(text: &str) -> Option<String> {
    let caps = regex!(r", (\d+)x(\d+),").captures(text)?;
    Some(format!("{}X{}", &caps[1], &caps[2]))
}

/// `N(.N)? fps` to a compact decimal string.
pub fn parse_frame_rate(text: &str) -> Option<String> {
    let caps = regex!(r"(\d+(\.\d+)?) fps").captures(text)?;
    compact_decimal(&caps[1])
}

/// Significant digits kept in a frame rate
const FRAME_RATE_DIGITS: i32 = 6;

// Six significant digits, trailing zeros dropped:
// "30.00" -> "30", "29.970" -> "29.97", "23.9760239" -> "23.976"
fn compact_decimal(s: &str) -> Option<String> {
    let value: f64 = s.parse().ok()?;
    if value == 0.0 {
        return Some("0".to_string());
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (FRAME_RATE_DIGITS - 1 - magnitude).max(0) as usize;
    let fixed = format!("{:.*}", decimals, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    Some(trimmed.to_string())
}
