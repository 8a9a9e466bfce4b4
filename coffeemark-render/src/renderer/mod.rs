//! The rendering pipeline.
//!
//! Rendering is a fixed sequence of full-text rewrite stages applied to a
//! single string; there is no intermediate syntax tree. Each stage is a
//! regex-driven substitution for one construct, and stage order carries the
//! precedence rules: later stages must not corrupt markup emitted by earlier
//! ones, and earlier stages must not consume syntax meant for later ones.
//!
//! The `<columns>` handler re-enters a reduced subset of this pipeline for
//! its inner blocks. The subset is expressed through [`Stage`] so it cannot
//! drift from the stage implementations themselves.

mod blocks;
mod extensions;
mod inline;
mod lists;
mod paragraph;
mod sanitize;

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use crate::{
  styles::{StyleOverrides, Styles},
  utils::regex_or_never,
};

static CRLF_RE: LazyLock<Regex> = LazyLock::new(|| regex_or_never(r"\r\n?"));

/// Sentinel delimiting stashed code fragments. Code content must pass
/// through the remaining stages literally, so the code handlers park their
/// emitted HTML in a side stash and leave an opaque placeholder in the
/// text; the placeholders are swapped back exactly once, at the very end of
/// the top-level render.
pub(crate) const STASH_SENTINEL: char = '\u{E000}';

/// Fragments parked by the code handlers during a render call.
#[derive(Debug, Default)]
pub(crate) struct Stash {
  fragments: Vec<String>,
}

impl Stash {
  /// Park a block-level fragment; the placeholder is guarded against
  /// paragraph wrapping.
  pub(crate) fn park_block(&mut self, fragment: String) -> String {
    self.park(fragment, 'B')
  }

  /// Park an inline fragment.
  pub(crate) fn park_inline(&mut self, fragment: String) -> String {
    self.park(fragment, 'I')
  }

  fn park(&mut self, fragment: String, kind: char) -> String {
    let placeholder = format!(
      "{STASH_SENTINEL}{kind}{}{STASH_SENTINEL}",
      self.fragments.len()
    );
    self.fragments.push(fragment);
    placeholder
  }

  /// Swap every placeholder back for its parked fragment.
  fn restore(&self, html: &str) -> String {
    let mut out = html.to_string();
    for (i, fragment) in self.fragments.iter().enumerate() {
      for kind in ['B', 'I'] {
        let placeholder = format!("{STASH_SENTINEL}{kind}{i}{STASH_SENTINEL}");
        if out.contains(&placeholder) {
          out = out.replace(&placeholder, fragment);
        }
      }
    }
    out
  }
}

/// A single rewrite stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
  Columns,
  Bgc,
  Background,
  Custom,
  Align,
  Tables,
  CodeBlocks,
  InlineCode,
  Images,
  Headings,
  Blockquotes,
  UnorderedLists,
  OrderedLists,
  Links,
  Bold,
  Underline,
  Italic,
  EscapedNewlines,
  Paragraphs,
  Poetry,
  Checkboxes,
}

/// Full stage order for a top-level render. Extension containers first so
/// their recursive sub-render sees unprocessed markdown, then standard
/// blocks, then inline constructs, then the paragraph wrapper and post-pass.
const FULL_PIPELINE: [Stage; 21] = [
  Stage::Columns,
  Stage::Bgc,
  Stage::Background,
  Stage::Custom,
  Stage::Align,
  Stage::Tables,
  Stage::CodeBlocks,
  Stage::InlineCode,
  Stage::Images,
  Stage::Headings,
  Stage::Blockquotes,
  Stage::UnorderedLists,
  Stage::OrderedLists,
  Stage::Links,
  Stage::Bold,
  Stage::Underline,
  Stage::Italic,
  Stage::EscapedNewlines,
  Stage::Paragraphs,
  Stage::Poetry,
  Stage::Checkboxes,
];

/// Reduced stage order applied to the float and main blocks of a
/// `<columns>` region. Excludes sanitization (the text is already escaped)
/// and the columns stage itself (no unbounded recursion).
const NESTED_PIPELINE: [Stage; 16] = [
  Stage::CodeBlocks,
  Stage::InlineCode,
  Stage::Images,
  Stage::Headings,
  Stage::Blockquotes,
  Stage::UnorderedLists,
  Stage::OrderedLists,
  Stage::Links,
  Stage::Bold,
  Stage::Underline,
  Stage::Italic,
  Stage::EscapedNewlines,
  Stage::Paragraphs,
  Stage::Bgc,
  Stage::Custom,
  Stage::Align,
];

/// CoffeeMarkdown renderer.
///
/// Owns the merged style configuration; rendering itself is purely
/// functional over the input string, so a single renderer is safe to share
/// across threads and invoke concurrently.
#[derive(Debug, Clone)]
pub struct Renderer {
  styles: Styles,
}

impl Default for Renderer {
  fn default() -> Self {
    Self::with_styles(Styles::default())
  }
}

impl Renderer {
  /// Create a renderer, merging the given overrides over the default styles.
  #[must_use]
  pub fn new(overrides: StyleOverrides) -> Self {
    Self::with_styles(Styles::with_overrides(overrides))
  }

  /// Create a renderer from an already-merged style configuration.
  #[must_use]
  pub const fn with_styles(styles: Styles) -> Self {
    Self { styles }
  }

  /// Access the merged style configuration.
  #[must_use]
  pub const fn styles(&self) -> &Styles {
    &self.styles
  }

  /// Render markdown to HTML.
  ///
  /// Never fails: empty or whitespace-only input yields an empty string
  /// (with a logged diagnostic), and malformed extension syntax is left as
  /// escaped literal text.
  #[must_use]
  pub fn render(&self, markdown: &str) -> String {
    if markdown.trim().is_empty() {
      debug!("empty or whitespace-only markdown input, returning empty string");
      return String::new();
    }

    let normalized = CRLF_RE.replace_all(markdown, "\n");

    // Sanitization runs exactly once, before any other stage.
    let html = sanitize::escape_html(&normalized);
    let mut stash = Stash::default();
    let html = self.apply_stages(&html, &FULL_PIPELINE, &mut stash);
    stash.restore(&html)
  }

  /// Re-enter the pipeline for the inner blocks of a `<columns>` region.
  /// The input is already sanitized by the top-level pass; the stash is
  /// shared with the outer render so parked code stays opaque until the
  /// whole document is done.
  pub(crate) fn render_nested_block(
    &self,
    block: &str,
    stash: &mut Stash,
  ) -> String {
    self.apply_stages(block, &NESTED_PIPELINE, stash)
  }

  fn apply_stages(
    &self,
    input: &str,
    stages: &[Stage],
    stash: &mut Stash,
  ) -> String {
    let mut html = input.to_string();
    for stage in stages {
      trace!("applying stage {stage:?}");
      html = self.apply_stage(*stage, &html, stash);
    }
    html
  }

  fn apply_stage(
    &self,
    stage: Stage,
    html: &str,
    stash: &mut Stash,
  ) -> String {
    match stage {
      Stage::Columns => self.handle_columns(html, stash),
      Stage::Bgc => self.handle_bgc(html),
      Stage::Background => self.handle_background(html),
      Stage::Custom => self.handle_custom(html),
      Stage::Align => self.handle_align(html),
      Stage::Tables => self.handle_tables(html),
      Stage::CodeBlocks => self.handle_code_blocks(html, stash),
      Stage::InlineCode => self.handle_inline_code(html, stash),
      Stage::Images => self.handle_images(html),
      Stage::Headings => self.handle_headings(html),
      Stage::Blockquotes => self.handle_blockquotes(html),
      Stage::UnorderedLists => self.handle_unordered_lists(html),
      Stage::OrderedLists => self.handle_ordered_lists(html),
      Stage::Links => self.handle_links(html),
      Stage::Bold => self.handle_bold(html),
      Stage::Underline => Self::handle_underline(html),
      Stage::Italic => self.handle_italic(html),
      Stage::EscapedNewlines => Self::handle_escaped_newlines(html),
      Stage::Paragraphs => self.handle_paragraphs(html),
      Stage::Poetry => self.handle_poetry(html),
      Stage::Checkboxes => self.handle_checkboxes(html),
    }
  }
}
