//! The sanitizer: first stage of every render.
//!
//! Scans the raw input for bracket-delimited tag-like tokens and escapes
//! every token whose tag name is not on the allow-list. This is the only
//! defense against arbitrary HTML/script injection through `<...>` syntax,
//! so it must run exactly once, before any other stage.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::regex_or_never;

/// Tags passed through unchanged because a later stage (or the browser)
/// is responsible for interpreting them.
const ALLOWED_TAGS: [&str; 13] = [
  "u", "b", "i", "code", "pre", "custom", "bgc", "url", "br", "align",
  "columns", "poetry", "background",
];

static TAG_TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"<([^>]+)>"));
static TAG_NAME_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"^/?([\w-]+)"));

/// Escape all tag-like tokens except the fixed allow-list.
///
/// Allow-listed tokens pass through unchanged, attributes included. Every
/// other token is escaped whole (angle brackets and all attributes), with
/// embedded quote characters separately entity-escaped.
pub(crate) fn escape_html(md: &str) -> String {
  TAG_TOKEN_RE
    .replace_all(md, |caps: &regex::Captures| {
      let tag_content = &caps[1];
      if let Some(name_caps) = TAG_NAME_RE.captures(tag_content) {
        let tag_name = name_caps[1].to_lowercase();
        if ALLOWED_TAGS.contains(&tag_name.as_str()) {
          return caps[0].to_string();
        }
      }
      let escaped = tag_content
        .replace('"', "&quot;")
        .replace('\'', "&#39;");
      format!("&lt;{escaped}&gt;")
    })
    .to_string()
}
