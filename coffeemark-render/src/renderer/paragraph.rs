//! The paragraph wrapper and the checkbox post-pass.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Renderer, STASH_SENTINEL};
use crate::utils::regex_or_never;

static MULTI_NEWLINE_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"\n{2,}"));
static PARAGRAPH_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(^|\n{2,})([^\n]+(?:\n[^\n]+)*)"));

// Runs that already open with block-level markup emitted by an earlier
// stage must not be wrapped a second time.
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(
    r"(?i)^</?(?:h[1-6]|ul|ol|li|blockquote|table|thead|tbody|tr|pre|div|p|img|poetry)[\s>/]",
  )
});

// Bare checkbox tokens left at the start of an emitted list item.
static LI_CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(r"<li([^>]*)>(\s*)\[([ xX])\](\s*)([\s\S]*?)</li>")
});

impl Renderer {
  /// Wrap bare text runs in paragraph elements.
  ///
  /// Blank-line boundaries (2+ newlines, collapsed to exactly two) separate
  /// runs; single newlines inside a run become `<br>`. Runs that already
  /// begin with a block-level tag are left untouched.
  pub(crate) fn handle_paragraphs(&self, html: &str) -> String {
    let normalized = MULTI_NEWLINE_RE.replace_all(html, "\n\n");

    PARAGRAPH_RE
      .replace_all(&normalized, |caps: &Captures| {
        let sep = &caps[1];
        let run = caps[2].trim();
        // A parked fenced code block is block-level even though the
        // placeholder itself looks like bare text.
        let parked_block =
          run.starts_with(STASH_SENTINEL) && run[STASH_SENTINEL.len_utf8()..].starts_with('B');
        if BLOCK_TAG_RE.is_match(run) || parked_block {
          return format!("{sep}{}", &caps[2]);
        }
        format!(
          "{sep}<p style=\"{}\">{}</p>",
          self.styles().p,
          run.replace('\n', "<br>")
        )
      })
      .to_string()
  }

  /// Normalize any bare `[ ]`/`[x]` token still opening an `<li>` into the
  /// styled checkbox span. Catches tokens the list stage did not consume,
  /// e.g. ones introduced by an extension block's inner render.
  pub(crate) fn handle_checkboxes(&self, html: &str) -> String {
    LI_CHECKBOX_RE
      .replace_all(html, |caps: &Captures| {
        let checked = caps[3].eq_ignore_ascii_case("x");
        format!(
          "<li{}>{}{}{}{}</li>",
          &caps[1],
          &caps[2],
          self.checkbox_span(checked),
          &caps[4],
          &caps[5]
        )
      })
      .to_string()
  }
}
