//! Standard block handlers: tables, fenced code, inline code, images,
//! headings and blockquotes.

use std::{fmt::Write, sync::LazyLock};

use regex::{Captures, Regex};

use super::{Renderer, Stash};
use crate::utils::{encode_uri_component, regex_or_never};

// Header row, separator row, one or more data rows.
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(
    r"(?m)(^|\n)(\|[^\n]+\|[ \t]*\n\|[ \t]*(?::?-+:?\|)+[ \t]*\n(?:\|[^\n]+\|[ \t]*(?:\n|$))+)",
  )
});

static CODE_BLOCK_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"```([\s\S]*?)```"));
static INLINE_CODE_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"`([^`]+)`"));

// Only match up to whitespace or the closing paren for the URL; an optional
// quoted title is consumed and ignored.
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(r#"!\[([^\]]*)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#)
});

// Longest heading wins: six hashes are tried before one, and a seventh hash
// is kept as heading text rather than producing a seventh level.
static HEADING_OVERFLOW_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^#{6}(#+ [^\n]*)$"));
static H6_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^#{6} (.*)$"));
static H5_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^#{5} (.*)$"));
static H4_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^#{4} (.*)$"));
static H3_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^### (.*)$"));
static H2_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^## (.*)$"));
static H1_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^# (.*)$"));

static BLOCKQUOTE_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(^|\n)(>[^\n]*(?:\n>[^\n]*)*)"));

/// Cells of a `|a|b|c|` table line, outer delimiters dropped.
fn table_cells(line: &str) -> Vec<&str> {
  let parts: Vec<&str> = line.split('|').collect();
  if parts.len() < 3 {
    return Vec::new();
  }
  parts[1..parts.len() - 1].to_vec()
}

/// Column alignment derived from a separator cell.
fn column_alignment(cell: &str) -> Option<&'static str> {
  let cell = cell.trim();
  let starts = cell.starts_with(':');
  let ends = cell.ends_with(':');
  let dashes = cell.trim_matches(':');
  if dashes.is_empty() || !dashes.chars().all(|c| c == '-') {
    return None;
  }
  match (starts, ends) {
    (true, true) => Some("center"),
    (false, true) => Some("right"),
    (true, false) => Some("left"),
    (false, false) => None,
  }
}

impl Renderer {
  /// Markdown tables with per-column alignment from the separator row.
  /// Cell content runs through the inline-only pipeline, never the block
  /// pipeline.
  pub(crate) fn handle_tables(&self, html: &str) -> String {
    TABLE_RE
      .replace_all(html, |caps: &Captures| {
        let sep = &caps[1];
        let block = caps[2].trim();
        let lines: Vec<&str> = block.lines().map(str::trim).collect();
        if lines.len() < 2 {
          return caps[0].to_string();
        }

        let headers: Vec<String> = table_cells(lines[0])
          .iter()
          .map(|cell| self.process_inline(cell.trim()))
          .collect();
        let aligns: Vec<Option<&str>> =
          table_cells(lines[1]).iter().map(|c| column_alignment(c)).collect();

        let align_style = |i: usize| {
          aligns
            .get(i)
            .copied()
            .flatten()
            .map_or_else(String::new, |a| format!("text-align:{a};"))
        };

        let mut thead = String::from("<thead><tr>");
        for (i, header) in headers.iter().enumerate() {
          let _ = write!(
            thead,
            "<th style=\"{}{}\">{header}</th>",
            self.styles().th,
            align_style(i)
          );
        }
        thead.push_str("</tr></thead>");

        let mut tbody = String::from("<tbody>");
        for row in &lines[2..] {
          tbody.push_str("<tr>");
          for (i, cell) in table_cells(row).iter().enumerate() {
            let _ = write!(
              tbody,
              "<td style=\"{}{}\">{}</td>",
              self.styles().td,
              align_style(i),
              self.process_inline(cell.trim())
            );
          }
          tbody.push_str("</tr>");
        }
        tbody.push_str("</tbody>");

        format!(
          "{sep}<table style=\"{}\">{thead}{tbody}</table>",
          self.styles().table
        )
      })
      .to_string()
  }

  /// Triple-backtick fenced code blocks. Content is passed through
  /// literally, with leading and trailing blank lines trimmed. The emitted
  /// HTML is parked in the stash so no later stage can re-match inside it.
  pub(crate) fn handle_code_blocks(
    &self,
    html: &str,
    stash: &mut Stash,
  ) -> String {
    CODE_BLOCK_RE
      .replace_all(html, |caps: &Captures| {
        stash.park_block(format!(
          "<pre style=\"{}\"><code style=\"{}\">{}</code></pre>",
          self.styles().pre,
          self.styles().code,
          caps[1].trim_matches('\n')
        ))
      })
      .to_string()
  }

  /// Single-backtick inline code, non-greedy, no nested backticks. Parked
  /// in the stash like fenced blocks.
  pub(crate) fn handle_inline_code(
    &self,
    html: &str,
    stash: &mut Stash,
  ) -> String {
    INLINE_CODE_RE
      .replace_all(html, |caps: &Captures| {
        stash.park_inline(format!(
          "<code style=\"{}\">{}</code>",
          self.styles().code,
          &caps[1]
        ))
      })
      .to_string()
  }

  /// `![alt](url)` images, with the `img-proxy:` rewrite rule.
  ///
  /// A proxied URL shorter than 6 characters is rejected (empty `src`);
  /// otherwise the image is routed through the external proxy endpoint with
  /// the original URL percent-encoded.
  pub(crate) fn handle_images(&self, html: &str) -> String {
    IMAGE_RE
      .replace_all(html, |caps: &Captures| {
        let alt = &caps[1];
        // Drop any accidental tag-like tail from the URL
        let url = caps[2].split('<').next().unwrap_or("");
        let src = match url.strip_prefix("img-proxy:") {
          Some(real) if real.len() < 6 => String::new(),
          Some(real) => {
            format!("/api/image-proxy?url={}", encode_uri_component(real))
          },
          None => url.to_string(),
        };
        format!(
          "<img src=\"{src}\" alt=\"{alt}\" style=\"{}\" crossorigin=\"anonymous\" />",
          self.styles().img
        )
      })
      .to_string()
  }

  /// `#`..`######` headings, checked longest-first.
  pub(crate) fn handle_headings(&self, html: &str) -> String {
    let styles = self.styles();
    let heading =
      |style: &str, caps: &Captures, level: u8| -> String {
        format!("<h{level} style=\"{style}\">{}</h{level}>", &caps[1])
      };

    let html = HEADING_OVERFLOW_RE
      .replace_all(html, |caps: &Captures| heading(&styles.h6, caps, 6));
    let html =
      H6_RE.replace_all(&html, |caps: &Captures| heading(&styles.h6, caps, 6));
    let html =
      H5_RE.replace_all(&html, |caps: &Captures| heading(&styles.h5, caps, 5));
    let html =
      H4_RE.replace_all(&html, |caps: &Captures| heading(&styles.h4, caps, 4));
    let html =
      H3_RE.replace_all(&html, |caps: &Captures| heading(&styles.h3, caps, 3));
    let html =
      H2_RE.replace_all(&html, |caps: &Captures| heading(&styles.h2, caps, 2));
    H1_RE
      .replace_all(&html, |caps: &Captures| heading(&styles.h1, caps, 1))
      .to_string()
  }

  /// Consecutive `>` lines collapse into a single blockquote, joined with
  /// single spaces.
  pub(crate) fn handle_blockquotes(&self, html: &str) -> String {
    BLOCKQUOTE_RE
      .replace_all(html, |caps: &Captures| {
        let sep = &caps[1];
        let content = caps[2]
          .lines()
          .map(|line| line.strip_prefix('>').unwrap_or(line).trim())
          .collect::<Vec<_>>()
          .join(" ");
        format!(
          "{sep}<blockquote style=\"{}\">{content}</blockquote>",
          self.styles().blockquote
        )
      })
      .to_string()
  }
}
