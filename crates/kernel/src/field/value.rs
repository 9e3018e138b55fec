//! Text field values and their render variants.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::content::{
    FilterPipeline, Formatter, MarkdownFilter, OutputMode, SanitizeFilter,
};
use crate::error::{FieldError, FieldResult};

/// Render variant of a text field.
///
/// All variants store the same plain text; they differ only in how that
/// text becomes HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain text, HTML-escaped with line breaks preserved.
    Text,
    /// Stored HTML, sanitized.
    Html,
    /// Markdown converted to HTML without sanitization.
    RawMarkdown,
    /// Markdown converted to HTML, then sanitized.
    Markdown,
}

impl FieldKind {
    /// All kinds, in standard registration order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Text,
        FieldKind::Html,
        FieldKind::RawMarkdown,
        FieldKind::Markdown,
    ];

    /// Symbolic type name this kind is registered under.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Html => "html",
            FieldKind::RawMarkdown => "raw_markdown",
            FieldKind::Markdown => "markdown",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "Plain text",
            FieldKind::Html => "HTML",
            FieldKind::RawMarkdown => "Markdown (unsanitized)",
            FieldKind::Markdown => "Markdown",
        }
    }

    /// Whether every non-blank render passes through the sanitizer.
    pub fn is_sanitized(&self) -> bool {
        matches!(self, FieldKind::Html | FieldKind::Markdown)
    }

    /// Build the filter pipeline for this kind.
    pub fn pipeline(&self, formatter: &Formatter, mode: OutputMode) -> FilterPipeline {
        let markdown = || MarkdownFilter::new(formatter.converter().clone(), mode);
        let sanitize = || SanitizeFilter::new(formatter.sanitizer().clone());
        match self {
            FieldKind::Text => FilterPipeline::plain_text(),
            FieldKind::Html => FilterPipeline::new().add(sanitize()),
            FieldKind::RawMarkdown => FilterPipeline::new().add(markdown()),
            FieldKind::Markdown => FilterPipeline::new().add(markdown()).add(sanitize()),
        }
    }

    /// Render `content` as this kind. Blank content renders as `""`.
    pub fn render(&self, content: &str, formatter: &Formatter, mode: OutputMode) -> String {
        if is_blank(content) {
            return String::new();
        }
        debug!(kind = self.type_name(), %mode, len = content.len(), "rendering field");
        self.pipeline(formatter, mode).process(content)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.type_name())
    }
}

/// Empty or whitespace-only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// A single stored text value tagged with its render variant.
///
/// Dereferences to `str` so it can stand in for a plain text attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextField {
    kind: FieldKind,
    content: String,
}

impl TextField {
    /// Wrap `content` as the given kind.
    pub fn new(kind: FieldKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// Sanitized Markdown field.
    pub fn markdown(content: impl Into<String>) -> Self {
        Self::new(FieldKind::Markdown, content)
    }

    /// Unsanitized Markdown field.
    pub fn raw_markdown(content: impl Into<String>) -> Self {
        Self::new(FieldKind::RawMarkdown, content)
    }

    /// Plain text field.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(FieldKind::Text, content)
    }

    /// Sanitized HTML field.
    pub fn html(content: impl Into<String>) -> Self {
        Self::new(FieldKind::Html, content)
    }

    /// Wrap raw bytes, rejecting invalid UTF-8.
    pub fn from_bytes(kind: FieldKind, bytes: Vec<u8>) -> FieldResult<Self> {
        let content = String::from_utf8(bytes).map_err(|e| FieldError::InvalidEncoding {
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;
        Ok(Self::new(kind, content))
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_inner(self) -> String {
        self.content
    }

    pub fn is_blank(&self) -> bool {
        is_blank(&self.content)
    }

    /// Render to HTML with XHTML-style void elements.
    pub fn render(&self, formatter: &Formatter) -> String {
        self.render_with(formatter, OutputMode::default())
    }

    /// Render to HTML in the given output mode.
    pub fn render_with(&self, formatter: &Formatter, mode: OutputMode) -> String {
        self.kind.render(&self.content, formatter, mode)
    }
}

impl Deref for TextField {
    type Target = str;

    fn deref(&self) -> &str {
        &self.content
    }
}

impl AsRef<str> for TextField {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl From<String> for TextField {
    fn from(content: String) -> Self {
        Self::markdown(content)
    }
}

impl From<&str> for TextField {
    fn from(content: &str) -> Self {
        Self::markdown(content)
    }
}

impl Serialize for TextField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.content)
    }
}
