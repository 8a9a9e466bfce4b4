//! Extension block handlers: `<columns>`, `<bgc>`, `<background>`,
//! `<custom>`, `<align>` and `<poetry>`.
//!
//! All of these run after sanitization and match their opening/closing tag
//! pair case-insensitively. Attribute values are parsed permissively from
//! the free-form text of the opening tag; a region whose attributes or
//! closing tag do not match the expected pattern is simply left alone and
//! survives as escaped literal text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Renderer, Stash};
use crate::utils::regex_or_never;

static BGC_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)<bgc(?:\s+([^>]*?))?>([\s\S]*?)</bgc>"));
static BGC_BG_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)bg\s*:\s*([#\w(),.%]+)"));
static BGC_TEXT_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)text\s*:\s*([#\w(),.%]+)"));

static BACKGROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(r"(?i)<background(?:\s+([^>]*?))?>([\s\S]*?)</background>")
});
// Quoted (single or double) or bare token values; URLs may contain colons
// and slashes, so bare values only stop at whitespace or a semicolon.
static BACKGROUND_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(r#"(?i)color\s*:\s*(?:"([^"]+)"|'([^']+)'|([^\s;]+))"#)
});
static BACKGROUND_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(r#"(?i)image\s*:\s*(?:"([^"]+)"|'([^']+)'|([^\s;]+))"#)
});
static BACKGROUND_GRADIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(r#"(?i)gradient\s*:\s*(?:"([^"]+)"|'([^']+)'|([^\s;]+))"#)
});
static BACKGROUND_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(r#"(?i)text\s*:\s*(?:"([^"]+)"|'([^']+)'|([^\s;]+))"#)
});

static CUSTOM_RAW_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(
    r#"(?i)<custom\s+style=(?:"([^"]*)"|'([^']*)')\s*>([\s\S]*?)</custom>"#,
  )
});
static CUSTOM_ESCAPED_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(
    r"(?i)&lt;custom\s+style=(?:&quot;([\s\S]*?)&quot;|'([\s\S]*?)')&gt;([\s\S]*?)&lt;/custom&gt;",
  )
});

static ALIGN_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)<align\s+([^>]+)>([\s\S]*?)</align>"));

static COLUMNS_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never(
    r#"(?i)<columns\s+float=(?:"(left|right)"|'(left|right)')(?:\s+width=(?:"(\d{1,2}(?:\.\d+)?%)"|'(\d{1,2}(?:\.\d+)?%)'))?\s*>([\s\S]*?)</columns>"#,
  )
});
// A line containing exactly `---` splits float content from main content.
static COLUMNS_SEPARATOR_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"\n[ \t]*---[ \t]*\n"));

static POETRY_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)<poetry>([\s\S]*?)</poetry>"));
static P_OPEN_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)<p[^>]*>"));
static P_CLOSE_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)</p>"));

/// First non-empty capture of a quoted-or-bare attribute value.
fn attr_value(caps: &Captures, groups: [usize; 3]) -> Option<String> {
  groups
    .iter()
    .find_map(|&i| caps.get(i))
    .map(|m| m.as_str().to_string())
}

impl Renderer {
  /// `<bgc bg:<color> text:<color>>` → styled container.
  pub(crate) fn handle_bgc(&self, html: &str) -> String {
    BGC_RE
      .replace_all(html, |caps: &Captures| {
        let attrs = caps.get(1).map_or("", |m| m.as_str()).trim();
        let content = &caps[2];
        let bg = BGC_BG_RE.captures(attrs).map(|c| c[1].to_string());
        let text = BGC_TEXT_RE.captures(attrs).map(|c| c[1].to_string());
        let mut style = self.styles().bgc.clone();
        if let Some(bg) = bg {
          style.push_str(&format!("background:{bg};"));
        }
        if let Some(text) = text {
          style.push_str(&format!("color:{text};"));
        }
        format!("<div style=\"{style}\">{content}</div>")
      })
      .to_string()
  }

  /// `<background color:.. image:.. gradient:.. text:..>` → styled
  /// container composing up to four CSS properties.
  pub(crate) fn handle_background(&self, html: &str) -> String {
    BACKGROUND_RE
      .replace_all(html, |caps: &Captures| {
        let attrs = caps.get(1).map_or("", |m| m.as_str()).trim();
        let content = &caps[2];
        let color =
          BACKGROUND_COLOR_RE.captures(attrs).and_then(|c| attr_value(&c, [1, 2, 3]));
        let image =
          BACKGROUND_IMAGE_RE.captures(attrs).and_then(|c| attr_value(&c, [1, 2, 3]));
        let gradient = BACKGROUND_GRADIENT_RE
          .captures(attrs)
          .and_then(|c| attr_value(&c, [1, 2, 3]));
        let text =
          BACKGROUND_TEXT_RE.captures(attrs).and_then(|c| attr_value(&c, [1, 2, 3]));

        let mut style = self.styles().background.clone();
        if let Some(color) = color {
          style.push_str(&format!("background:{color};"));
        }
        if let Some(gradient) = gradient {
          style.push_str(&format!("background-image:{gradient};"));
        }
        if let Some(image) = image {
          style.push_str(&format!(
            "background-image:url('{image}');background-size:cover;background-position:center;"
          ));
        }
        if let Some(text) = text {
          style.push_str(&format!("color:{text};"));
        }
        format!("<div style=\"{style}\">{content}</div>")
      })
      .to_string()
  }

  /// `<custom style="...">` → styled inline span, the user style
  /// concatenated after the default custom style.
  ///
  /// Matches both the raw tag form (the sanitizer allow-lists `custom`, so
  /// the tag normally survives unescaped) and the entity-escaped form for
  /// text where the author wrote the entities out themselves.
  pub(crate) fn handle_custom(&self, html: &str) -> String {
    let emit = |user_style: &str, content: &str| {
      let unescaped = user_style.replace("&quot;", "\"");
      let style = format!("{}{unescaped}", self.styles().custom);
      format!("<span style=\"{}\">{content}</span>", style.trim())
    };

    let pass_one = CUSTOM_RAW_RE.replace_all(html, |caps: &Captures| {
      let user_style =
        caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
      emit(user_style, &caps[3])
    });

    CUSTOM_ESCAPED_RE
      .replace_all(&pass_one, |caps: &Captures| {
        let user_style =
          caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        emit(user_style, &caps[3])
      })
      .to_string()
  }

  /// `<align left|right|center|justify>` → alignment container.
  /// Unrecognized values fall back to the default alignment style.
  pub(crate) fn handle_align(&self, html: &str) -> String {
    ALIGN_RE
      .replace_all(html, |caps: &Captures| {
        let content = &caps[2];
        let style = match caps[1].trim().to_lowercase().as_str() {
          "left" => "text-align:left;",
          "right" => "text-align:right;",
          "center" => "text-align:center;",
          "justify" => "text-align:justify; padding:0.8em; margin:1em 0;",
          _ => self.styles().align.as_str(),
        };
        format!("<div style=\"{style}\">{content}</div>")
      })
      .to_string()
  }

  /// `<columns float="left|right" width="NN%">` → two-`div` float layout.
  ///
  /// The body splits on the first line containing exactly `---` into a
  /// float block and a main block (no separator: everything is the main
  /// block). Both blocks re-enter the reduced pipeline recursively.
  pub(crate) fn handle_columns(
    &self,
    html: &str,
    stash: &mut Stash,
  ) -> String {
    COLUMNS_RE
      .replace_all(html, |caps: &Captures| {
        let float_direction =
          caps.get(1).or_else(|| caps.get(2)).map_or("left", |m| m.as_str());
        let float_width =
          caps.get(3).or_else(|| caps.get(4)).map_or("40%", |m| m.as_str());
        let inner = &caps[5];

        let (float_md, main_md) = COLUMNS_SEPARATOR_RE.find(inner).map_or_else(
          || (String::new(), inner.trim().to_string()),
          |sep| {
            (
              inner[..sep.start()].trim().to_string(),
              inner[sep.end()..].trim().to_string(),
            )
          },
        );

        let float_block = self.render_nested_block(&float_md, stash);
        let main_block = self.render_nested_block(&main_md, stash);

        let float_style = if float_direction == "left" {
          "float:left; margin-right:1.5em;"
        } else {
          "float:right; margin-left:1.5em;"
        };

        format!(
          "\n<div style=\"{section}\">\n    <div style=\"width:{float_width}; \
           {float_style} margin-bottom:0.7em;\">\n        {float_block}\n    \
           </div>\n    <div style=\"overflow:hidden;\">\n        \
           {main_block}\n    </div>\n</div>",
          section = self.styles().section,
        )
      })
      .to_string()
  }

  /// `<poetry>` → whitespace-preserving styled container. Strips any
  /// paragraph tags the paragraph stage injected inside the block.
  pub(crate) fn handle_poetry(&self, html: &str) -> String {
    POETRY_RE
      .replace_all(html, |caps: &Captures| {
        let cleaned = caps[1].trim_matches('\n');
        let no_open = P_OPEN_RE.replace_all(cleaned, "");
        let without_p = P_CLOSE_RE.replace_all(&no_open, "");
        format!(
          "<div style=\"{}\">{without_p}</div>",
          self.styles().poetry
        )
      })
      .to_string()
  }
}
