//! Text format filter pipeline.
//!
//! Every field kind renders through an ordered list of filters:
//! - text: HTML-escapes all content, then converts newlines
//! - html: sanitizes stored HTML
//! - raw_markdown: converts Markdown, no filtering
//! - markdown: converts Markdown, then sanitizes the result

use std::sync::Arc;

use super::convert::{MarkdownConverter, OutputMode};
use super::sanitize::HtmlSanitizer;

/// Trait for text filters in the pipeline.
pub trait TextFilter: Send + Sync {
    /// Filter name for debugging.
    fn name(&self) -> &str;

    /// Process the input text and return filtered output.
    fn process(&self, input: &str) -> String;
}

/// Pipeline of text filters applied in sequence.
pub struct FilterPipeline {
    filters: Vec<Box<dyn TextFilter>>,
}

impl FilterPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add<F: TextFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Create a plain text pipeline (escapes all HTML).
    pub fn plain_text() -> Self {
        Self::new().add(HtmlEscapeFilter).add(NewlineFilter)
    }

    /// Filter names in application order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Process text through all filters in the pipeline.
    pub fn process(&self, input: &str) -> String {
        self.filters
            .iter()
            .fold(input.to_string(), |acc, filter| filter.process(&acc))
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::plain_text()
    }
}

/// Filter that escapes all HTML characters.
pub struct HtmlEscapeFilter;

impl TextFilter for HtmlEscapeFilter {
    fn name(&self) -> &str {
        "html_escape"
    }

    fn process(&self, input: &str) -> String {
        input
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#x27;")
    }
}

/// Filter that converts newlines to <br> tags.
pub struct NewlineFilter;

impl TextFilter for NewlineFilter {
    fn name(&self) -> &str {
        "newline"
    }

    fn process(&self, input: &str) -> String {
        input.replace('\n', "<br>\n")
    }
}

/// Filter that converts Markdown to HTML.
pub struct MarkdownFilter {
    converter: Arc<dyn MarkdownConverter>,
    mode: OutputMode,
}

impl MarkdownFilter {
    pub fn new(converter: Arc<dyn MarkdownConverter>, mode: OutputMode) -> Self {
        Self { converter, mode }
    }
}

impl TextFilter for MarkdownFilter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn process(&self, input: &str) -> String {
        self.converter.convert(input, self.mode)
    }
}

/// Filter that sanitizes HTML against an allow-list.
pub struct SanitizeFilter {
    sanitizer: Arc<dyn HtmlSanitizer>,
}

impl SanitizeFilter {
    pub fn new(sanitizer: Arc<dyn HtmlSanitizer>) -> Self {
        Self { sanitizer }
    }
}

impl TextFilter for SanitizeFilter {
    fn name(&self) -> &str {
        "sanitize"
    }

    fn process(&self, input: &str) -> String {
        self.sanitizer.sanitize(input)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::{AmmoniaSanitizer, PulldownConverter};

    #[test]
    fn html_escape_filter() {
        let filter = HtmlEscapeFilter;
        assert_eq!(
            filter.process("<script>alert('xss')</script>"),
            "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn html_escape_all_chars() {
        let filter = HtmlEscapeFilter;
        assert_eq!(filter.process("<>&\"'"), "&lt;&gt;&amp;&quot;&#x27;");
    }

    #[test]
    fn newline_filter() {
        let filter = NewlineFilter;
        assert_eq!(filter.process("line1\nline2"), "line1<br>\nline2");
    }

    #[test]
    fn plain_text_pipeline() {
        let pipeline = FilterPipeline::plain_text();
        let output = pipeline.process("<script>alert('xss')</script>\nLine 2");
        assert!(!output.contains("<script>"));
        assert!(output.contains("<br>"));
    }

    #[test]
    fn filter_pipeline_default() {
        // Default should be plain_text (safest)
        let output = FilterPipeline::default().process("<b>bold</b>");
        assert!(output.contains("&lt;b&gt;"));
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let input = "<script>alert('test')</script>";
        assert_eq!(FilterPipeline::new().process(input), input);
    }

    #[test]
    fn markdown_then_sanitize() {
        let pipeline = FilterPipeline::new()
            .add(MarkdownFilter::new(
                Arc::new(PulldownConverter),
                OutputMode::Xhtml,
            ))
            .add(SanitizeFilter::new(Arc::new(AmmoniaSanitizer::new())));
        let output = pipeline.process("*hi*\n\n<script>bad()</script>");
        assert!(output.contains("<em>hi</em>"));
        assert!(!output.contains("script"));
        assert_eq!(pipeline.names(), vec!["markdown", "sanitize"]);
    }

    #[test]
    fn filter_names() {
        assert_eq!(HtmlEscapeFilter.name(), "html_escape");
        assert_eq!(NewlineFilter.name(), "newline");
    }
}
