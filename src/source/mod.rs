//! Input loading for the list of remote video URLs.
//!
//! The input file is a JSON array of URL strings. It is read once at the
//! start of a run and validated into a [`SourceList`]; any shape problem is
//! reported as a [`ConfigError`] naming the offending entry.

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

/// Ordered, non-empty list of source URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceList {
    urls: Vec<String>,
}

impl SourceList {
    /// Returns the URLs in input order.
    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Returns an iterator over the URLs in input order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// Returns the number of URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if the list holds no URLs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Reads and validates the source list at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, is not JSON, is not an
/// array, is empty, or contains an entry that is not a non-blank string.
/// Entries that do not parse as absolute URLs are kept and logged, since the
/// downloader also accepts bare video identifiers.
#[instrument(fields(path = %path.display()))]
pub fn load_sources(path: &Path) -> Result<SourceList, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
    let sources = parse_sources(&raw, path)?;
    debug!(count = sources.len(), "Loaded source list");
    Ok(sources)
}

/// Validates raw JSON text as a source list. `path` is only used for error context.
///
/// # Errors
///
/// See [`load_sources`].
pub fn parse_sources(raw: &str, path: &Path) -> Result<SourceList, ConfigError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ConfigError::parse(path, e))?;
    let Value::Array(entries) = value else {
        return Err(ConfigError::NotAnArray {
            path: path.to_path_buf(),
            found: json_kind(&value),
        });
    };
    if entries.is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut urls = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Value::String(text) = entry else {
            return Err(ConfigError::invalid_entry(
                path,
                index,
                format!("expected a string, found {}", json_kind(entry)),
            ));
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(ConfigError::invalid_entry(path, index, "empty string"));
        }
        if let Err(parse_error) = Url::parse(text) {
            warn!(
                index,
                entry = text,
                error = %parse_error,
                "Source entry is not an absolute URL, passing it to the downloader as is"
            );
        }
        urls.push(text.to_string());
    }

    Ok(SourceList { urls })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(raw: &str) -> Result<SourceList, ConfigError> {
        parse_sources(raw, Path::new("videos.remote.json"))
    }

    #[test]
    fn test_parse_sources_keeps_input_order() {
        let list = parse(r#"["https://a.example/v/1", "https://b.example/v/2"]"#).unwrap();
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            ["https://a.example/v/1", "https://b.example/v/2"]
        );
    }

    #[test]
    fn test_parse_sources_trims_entries() {
        let list = parse(r#"["  https://a.example/watch?v=x  "]"#).unwrap();
        assert_eq!(list.urls(), ["https://a.example/watch?v=x"]);
    }

    #[test]
    fn test_parse_sources_empty_array_rejected() {
        assert!(matches!(parse("[]"), Err(ConfigError::Empty { .. })));
    }

    #[test]
    fn test_parse_sources_object_rejected() {
        let err = parse(r#"{"urls": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnArray { found: "object", .. }));
    }

    #[test]
    fn test_parse_sources_malformed_json_rejected() {
        assert!(matches!(parse("[\"https://a"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_parse_sources_non_string_entry_rejected() {
        let err = parse(r#"["https://a.example/1", 42]"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn test_parse_sources_keeps_entries_that_are_not_urls() {
        let list = parse(r#"["https://a.example/1", "dQw4w9WgXcQ", "not a url"]"#).unwrap();
        assert_eq!(
            list.urls(),
            ["https://a.example/1", "dQw4w9WgXcQ", "not a url"]
        );
    }

    #[test]
    fn test_parse_sources_blank_entry_rejected() {
        let err = parse(r#"["https://a.example/1", "   "]"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn test_load_sources_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = load_sources(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_sources_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("videos.remote.json");
        std::fs::write(&path, r#"["https://a.example/1"]"#).unwrap();
        let list = load_sources(&path).unwrap();
        assert_eq!(list.urls(), ["https://a.example/1"]);
    }
}
