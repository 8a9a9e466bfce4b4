//! Shared helpers: regex compilation with fallback, URL component encoding,
//! and style-override file loading.

use log::error;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::styles::StyleOverrides;

/// Error type for fallible renderer utilities.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Invalid style overrides: {0}")]
  Serde(#[from] serde_json::Error),
}

/// Result type for fallible renderer utilities.
pub type UtilResult<T> = Result<T, UtilError>;

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
///
/// # Panics
///
/// Panics if the pattern `[^\s\S]` fails to compile, which cannot happen.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(clippy::expect_used, reason = "This pattern is guaranteed to be valid")]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}

/// Compile a regex pattern, falling back to a never-matching regex on
/// failure. A handler whose pattern fails to compile simply stops matching
/// rather than taking the whole render down.
#[must_use]
pub fn regex_or_never(pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    error!("Failed to compile regex {pattern:?}: {e}");
    never_matching_regex()
  })
}

/// Characters escaped by `encodeURIComponent`: everything except
/// alphanumerics and `- _ . ! ~ * ' ( )`. The image-proxy collaborator
/// expects its `url` parameter encoded this way.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

/// Percent-encode a string for use as a URL query parameter value.
#[must_use]
pub fn encode_uri_component(value: &str) -> String {
  utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Load caller style overrides from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if the JSON is invalid.
pub fn load_style_overrides(
  path: &std::path::Path,
) -> UtilResult<StyleOverrides> {
  let content = std::fs::read_to_string(path)?;
  let overrides: StyleOverrides = serde_json::from_str(&content)?;
  Ok(overrides)
}
