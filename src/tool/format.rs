//! Download policy handed to the external tool.

/// Format selectors, most preferred first. The tool evaluates them in order
/// and uses the first one that matches an available stream set.
///
/// 1. H.264 video in mp4 plus AAC audio in m4a (remuxed)
/// 2. any H.264 video plus the best audio
/// 3. the best single mp4 file
/// 4. the best single file in any container
pub const FORMAT_PREFERENCE: [&str; 4] = [
    "bv*[ext=mp4][vcodec*=avc1]+ba[ext=m4a]",
    "bv*[vcodec*=avc1]+ba",
    "best[ext=mp4]",
    "best",
];

/// Container requested when the chosen format needs merging.
pub const MERGE_OUTPUT_FORMAT: &str = "mp4";

/// Per-item output template. Both placeholders are filled in by the tool with
/// the identifier it resolves for the URL, so reruns overwrite in place.
pub const OUTPUT_TEMPLATE: [&str; 2] = ["%(id)s", "%(id)s.%(ext)s"];

/// The preference chain as a single selector expression.
#[must_use]
pub fn format_selector() -> String {
    FORMAT_PREFERENCE.join("/")
}
