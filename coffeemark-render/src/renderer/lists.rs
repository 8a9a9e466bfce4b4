//! Unordered and ordered list handlers.
//!
//! Each contiguous run of marker lines becomes one list. Marker lines
//! indented deeper than the item before them form a nested sub-list of
//! whichever type their first line carries, arbitrarily deep. Items may
//! open with a `[ ]`/`[x]` checkbox token, and item text runs through the
//! inline-only pipeline. Ordered items are numbered by position, not by the
//! literal numbers in the source.

use std::{fmt::Write, sync::LazyLock};

use regex::{Captures, Regex};

use super::Renderer;
use crate::utils::regex_or_never;

// A block opens with an unindented marker line of the block's own type.
// Continuation lines are same-type markers at any indent, or other-type
// markers only when indented (those nest under the preceding item); an
// other-type marker at the left margin starts its own sibling list instead.
static UL_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(
    r"(^|\n)([-*] [^\n]*(?:\n(?:[ \t]*[-*] |[ \t]+\d+\. )[^\n]*)*)",
  )
});
static OL_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(
    r"(^|\n)(\d+\. [^\n]*(?:\n(?:[ \t]*\d+\. |[ \t]+[-*] )[^\n]*)*)",
  )
});

static ITEM_LINE_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"^([ \t]*)(?:([-*])|\d+\.) (.*)$"));
static CHECKBOX_TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"^\[([ xX])\]\s*"));

/// One marker line of a list block.
struct ListLine {
  indent:  usize,
  ordered: bool,
  text:    String,
}

fn parse_lines(block: &str) -> Vec<ListLine> {
  block
    .lines()
    .filter_map(|line| {
      ITEM_LINE_RE.captures(line).map(|caps| ListLine {
        indent:  caps[1].len(),
        ordered: caps.get(2).is_none(),
        text:    caps[3].to_string(),
      })
    })
    .collect()
}

impl Renderer {
  /// Contiguous `-`/`*` marker lines → one `<ul>`.
  pub(crate) fn handle_unordered_lists(&self, html: &str) -> String {
    UL_BLOCK_RE
      .replace_all(html, |caps: &Captures| {
        format!("{}{}", &caps[1], self.render_list_block(&caps[2], false))
      })
      .to_string()
  }

  /// Contiguous `N.` marker lines → one `<ol>`.
  pub(crate) fn handle_ordered_lists(&self, html: &str) -> String {
    OL_BLOCK_RE
      .replace_all(html, |caps: &Captures| {
        format!("{}{}", &caps[1], self.render_list_block(&caps[2], true))
      })
      .to_string()
  }

  fn render_list_block(&self, block: &str, ordered: bool) -> String {
    let lines = parse_lines(block);
    if lines.is_empty() {
      return block.to_string();
    }
    self.render_list(&lines, ordered)
  }

  fn render_list(&self, lines: &[ListLine], ordered: bool) -> String {
    let tag = if ordered { "ol" } else { "ul" };
    let list_style =
      if ordered { &self.styles().ol } else { &self.styles().ul };
    format!(
      "<{tag} style=\"{list_style}\">{}</{tag}>",
      self.render_items(lines)
    )
  }

  fn render_items(&self, lines: &[ListLine]) -> String {
    let base_indent = lines[0].indent;

    // Group into top-level items, attaching deeper lines to the item above.
    let mut items: Vec<(usize, usize)> = Vec::new(); // (item line, nested range end)
    for (i, line) in lines.iter().enumerate() {
      if line.indent <= base_indent || items.is_empty() {
        items.push((i, i + 1));
      } else if let Some(last) = items.last_mut() {
        last.1 = i + 1;
      }
    }

    let mut out = String::new();
    for (index, &(start, end)) in items.iter().enumerate() {
      let line = &lines[start];
      let mut content = line.text.trim().to_string();

      let nested = &lines[start + 1..end];
      let nested_html = if nested.is_empty() {
        String::new()
      } else {
        self.render_list(nested, nested[0].ordered)
      };

      let bullet = if line.ordered {
        format!(
          "<span style=\"margin-right:0.5em;color:#a5b4fc;\">{}.</span>",
          index + 1
        )
      } else {
        "<span style=\"margin-right:0.5em;color:#a5b4fc;\">\u{2022}</span>"
          .to_string()
      };

      let mut checkbox = String::new();
      if let Some(caps) = CHECKBOX_TOKEN_RE.captures(&content) {
        let checked = caps[1].eq_ignore_ascii_case("x");
        checkbox = self.checkbox_span(checked);
        content = CHECKBOX_TOKEN_RE.replace(&content, "").to_string();
      }

      let _ = write!(
        out,
        "<li style=\"{}\">{bullet}{checkbox}{}{nested_html}</li>",
        self.styles().li,
        self.process_inline(&content)
      );
    }
    out
  }
}
