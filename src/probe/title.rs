//! Manifest titles

use std::path::Path;

use super::codec::Codec;

/// Film-grain / dithering variant markers, in priority order
pub const VARIANT_MARKERS: [&str; 3] = ["fd0", "fd1", "fd2"];

/// Build `<family>-<resolution>p<framerate>fps` for recognized codecs, else
/// the file stem, then append `-<marker>` for the first variant marker found
/// in the file name.
pub fn derive_title(
    video_path: &Path,
    mime_type: &str,
    resolution: Option<&str>,
    frame_rate: &str,
) -> String {
    let file_name = video_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut title = match Codec::from_mime_type(mime_type).family() {
        Some(family) => format!(
            "{}-{}p{}fps",
            family,
            resolution.unwrap_or("unknown"),
            frame_rate
        ),
        None => video_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone()),
    };

    if let Some(marker) = VARIANT_MARKERS.iter().find(|m| file_name.contains(*m)) {
        title.push('-');
        title.push_str(marker);
    }
    title
}
