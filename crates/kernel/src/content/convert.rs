//! Markdown-to-HTML conversion.
//!
//! The converter is a strategy object so tests can substitute a fake.
//! The production implementation wraps `pulldown-cmark` with no
//! extensions enabled: raw HTML in the source passes through untouched.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use pulldown_cmark::{Parser, html};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Regex matching self-closing void elements emitted in XHTML style.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static SELF_CLOSING_VOID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(br|hr|img)\b([^<>]*?)\s*/>").expect("valid regex literal")
});

/// How void elements are written in converter output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// `<br />`, `<hr />`, `<img ... />`.
    #[default]
    Xhtml,
    /// `<br>`, `<hr>`, `<img ...>`.
    Html4,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Xhtml => "xhtml",
            OutputMode::Html4 => "html4",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xhtml" => Ok(OutputMode::Xhtml),
            "html4" => Ok(OutputMode::Html4),
            other => Err(FieldError::InvalidOutputMode(other.to_string())),
        }
    }
}

/// Converts Markdown source into HTML.
///
/// Implementations must be deterministic and total: every `&str` yields
/// some HTML, never a panic.
pub trait MarkdownConverter: Send + Sync {
    /// Converter name for debugging.
    fn name(&self) -> &str;

    /// Convert `text` to HTML using the given output mode.
    fn convert(&self, text: &str, mode: OutputMode) -> String;
}

/// CommonMark converter backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownConverter;

impl MarkdownConverter for PulldownConverter {
    fn name(&self) -> &str {
        "pulldown_cmark"
    }

    fn convert(&self, text: &str, mode: OutputMode) -> String {
        let parser = Parser::new(text);
        let mut output = String::with_capacity(text.len() + text.len() / 2);
        html::push_html(&mut output, parser);

        match mode {
            OutputMode::Xhtml => output,
            OutputMode::Html4 => to_html4(&output),
        }
    }
}

/// Rewrite XHTML-style void elements as HTML4 tags.
fn to_html4(html: &str) -> String {
    SELF_CLOSING_VOID
        .replace_all(html, "<${1}${2}>")
        .into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn converts_emphasis() {
        let html = PulldownConverter.convert("**bold**", OutputMode::Xhtml);
        assert_eq!(html.trim(), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn raw_html_passes_through() {
        let html = PulldownConverter.convert("<script>alert(1)</script>", OutputMode::Xhtml);
        assert!(html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn xhtml_mode_self_closes_void_elements() {
        let html = PulldownConverter.convert("line one  \nline two\n\n---\n", OutputMode::Xhtml);
        assert!(html.contains("<br />"));
        assert!(html.contains("<hr />"));
    }

    #[test]
    fn html4_mode_drops_self_closing_slash() {
        let html = PulldownConverter.convert("line one  \nline two\n\n---\n", OutputMode::Html4);
        assert!(html.contains("<br>"));
        assert!(html.contains("<hr>"));
        assert!(!html.contains("/>"));
    }

    #[test]
    fn html4_mode_exact_void_tags() {
        assert_eq!(
            PulldownConverter.convert("a  \nb", OutputMode::Html4),
            "<p>a<br>\nb</p>\n"
        );
        assert_eq!(PulldownConverter.convert("---", OutputMode::Html4), "<hr>\n");
        assert_eq!(
            PulldownConverter.convert("a  \nb", OutputMode::Xhtml),
            "<p>a<br />\nb</p>\n"
        );
    }

    #[test]
    fn html4_mode_keeps_image_attributes() {
        let html = PulldownConverter.convert("![alt text](/a.png \"T\")", OutputMode::Html4);
        assert!(html.contains(r#"<img src="/a.png" alt="alt text" title="T">"#));
    }

    #[test]
    fn to_html4_leaves_other_tags_alone() {
        assert_eq!(to_html4("<p>a</p><br/><input />"), "<p>a</p><br><input />");
        assert_eq!(to_html4("<br /><hr  /><BR/>"), "<br><hr><BR>");
        assert_eq!(to_html4("<brx />"), "<brx />");
    }

    #[test]
    fn output_mode_parsing() {
        assert_eq!("xhtml".parse::<OutputMode>().unwrap(), OutputMode::Xhtml);
        assert_eq!(" HTML4 ".parse::<OutputMode>().unwrap(), OutputMode::Html4);
        assert!("sgml".parse::<OutputMode>().is_err());
        assert_eq!(
            "html".parse::<OutputMode>().unwrap_err(),
            FieldError::InvalidOutputMode("html".to_string())
        );
    }

    #[test]
    fn output_mode_default_is_xhtml() {
        assert_eq!(OutputMode::default(), OutputMode::Xhtml);
        assert_eq!(OutputMode::Html4.to_string(), "html4");
    }

    #[test]
    fn converter_name() {
        assert_eq!(PulldownConverter.name(), "pulldown_cmark");
    }
}
