//! Inline handlers: links, bold, underline, italic, literal `\n` escapes
//! and checkbox tokens.
//!
//! These run after all block handlers so they cannot interfere with
//! block-level pattern matching. The same subset is re-used for table cells
//! and list item text through [`Renderer::process_inline`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Renderer;
use crate::utils::regex_or_never;

static LINK_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"\[([^\]]+)\]\(([^)]+)\)"));
static BOLD_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"\*\*([\s\S]+?)\*\*"));
static UNDERLINE_MD_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"__([\s\S]+?)__"));
// Raw <u> tags, with or without attributes, normalize to a styled <u>.
static UNDERLINE_TAG_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)<u(?:\s[^>]*)?>([\s\S]*?)</u>"));
static ITALIC_STAR_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"\*([\s\S]+?)\*"));
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"_([\s\S]+?)_"));
// Literal backslash-n, not a physical newline.
static ESCAPED_NEWLINE_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"\\n"));

impl Renderer {
  /// `[text](url)` → anchor with `target=_blank` and `rel=noopener`.
  pub(crate) fn handle_links(&self, html: &str) -> String {
    LINK_RE
      .replace_all(html, |caps: &Captures| {
        format!(
          "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" style=\"{}\">{}</a>",
          &caps[2],
          self.styles().a,
          &caps[1]
        )
      })
      .to_string()
  }

  /// `**text**` → styled `<b>`.
  pub(crate) fn handle_bold(&self, html: &str) -> String {
    BOLD_RE
      .replace_all(html, |caps: &Captures| {
        format!("<b style=\"{}\">{}</b>", self.styles().b, &caps[1])
      })
      .to_string()
  }

  /// `__text__` and raw `<u>` tags both normalize to a styled `<u>`.
  /// Must run before the italic handler so `__` is not eaten as `_`.
  pub(crate) fn handle_underline(html: &str) -> String {
    let html = UNDERLINE_MD_RE
      .replace_all(html, "<u style=\"text-decoration:underline;\">$1</u>");
    UNDERLINE_TAG_RE
      .replace_all(&html, "<u style=\"text-decoration:underline;\">$1</u>")
      .to_string()
  }

  /// `*text*` or `_text_` → styled `<i>`, non-greedy, spans newlines.
  pub(crate) fn handle_italic(&self, html: &str) -> String {
    let emit = |caps: &Captures| {
      format!("<i style=\"{}\">{}</i>", self.styles().i, &caps[1])
    };
    let html = ITALIC_STAR_RE.replace_all(html, emit);
    ITALIC_UNDERSCORE_RE.replace_all(&html, emit).to_string()
  }

  /// Literal two-character `\n` becomes `<br>`. Physical newlines are the
  /// paragraph stage's business, not ours.
  pub(crate) fn handle_escaped_newlines(html: &str) -> String {
    ESCAPED_NEWLINE_RE.replace_all(html, "<br>").to_string()
  }

  /// The styled checkbox span shared by list items, table cells and the
  /// final post-pass.
  pub(crate) fn checkbox_span(&self, checked: bool) -> String {
    let (state_style, mark) = if checked {
      ("var(--color-link);color:#fff;", "&#10003;")
    } else {
      ("var(--color-bg);", "")
    };
    format!(
      "<span style=\"{};background:{state_style};text-align:center;\">{mark}</span>",
      self.styles().checkbox
    )
  }

  /// Replace bare `[ ]`/`[x]` tokens that stand alone between whitespace
  /// (or string boundaries) with checkbox spans.
  pub(crate) fn render_checkboxes_inline(&self, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('[') {
      let (before, tail) = rest.split_at(pos);
      out.push_str(before);

      let checked = match tail.get(..3) {
        Some("[ ]") => Some(false),
        Some("[x]" | "[X]") => Some(true),
        _ => None,
      };

      if let Some(checked) = checked {
        let pre_ok = out.is_empty() || out.ends_with(char::is_whitespace);
        let post_ok =
          tail[3..].chars().next().is_none_or(char::is_whitespace);
        if pre_ok && post_ok {
          out.push_str(&self.checkbox_span(checked));
          rest = &tail[3..];
          continue;
        }
      }
      out.push('[');
      rest = &tail[1..];
    }
    out.push_str(rest);
    out
  }

  /// The inline-only pipeline applied to table cells and list item text:
  /// checkboxes, links, bold, underline, italic, escaped newlines. Never
  /// the block pipeline.
  pub(crate) fn process_inline(&self, text: &str) -> String {
    let html = self.render_checkboxes_inline(text);
    let html = self.handle_links(&html);
    let html = self.handle_bold(&html);
    let html = Self::handle_underline(&html);
    let html = self.handle_italic(&html);
    Self::handle_escaped_newlines(&html)
  }
}
