//! Display title sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 120;

/// Title used when neither metadata nor the identifier yields any allowed character.
pub const UNTITLED: &str = "untitled";

/// Anything outside ASCII word characters, whitespace, and `-()[].&',`.
#[allow(clippy::expect_used)]
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_\s()\[\].&',-]").expect("title allow-set regex is valid") // Static pattern, safe to panic
});

/// Reduces `raw` to a plain-text-safe title.
///
/// Line breaks and tabs become spaces, disallowed characters are dropped, the
/// result is trimmed and cut to [`MAX_TITLE_CHARS`]. Applying it twice gives
/// the same result as applying it once.
#[must_use]
pub fn sanitize_title(raw: &str) -> String {
    let flattened: String = raw
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect();
    let allowed = DISALLOWED.replace_all(&flattened, "");
    let truncated: String = allowed.trim().chars().take(MAX_TITLE_CHARS).collect();
    truncated.trim_end().to_string()
}

/// Sanitizes `candidate`, falling back to the sanitized `id` and then to [`UNTITLED`].
#[must_use]
pub fn title_or_id(candidate: Option<&str>, id: &str) -> String {
    candidate
        .map(sanitize_title)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| fallback_title(id))
}

/// Title derived from an item identifier alone.
#[must_use]
pub fn fallback_title(id: &str) -> String {
    let title = sanitize_title(id);
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

/// Title for a loose media file: the name without its final extension.
#[must_use]
pub fn title_from_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() => &file_name[..dot],
        _ => file_name,
    };
    title_or_id(Some(stem), file_name)
}
