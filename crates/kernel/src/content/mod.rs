//! Content rendering module.
//!
//! This module provides:
//! - MarkdownConverter: Markdown-to-HTML strategy (pulldown-cmark)
//! - HtmlSanitizer: HTML allow-list strategy (ammonia)
//! - FilterPipeline: Ordered text filters a field renders through
//! - Formatter: The converter/sanitizer pair shared by all fields

mod convert;
mod filter;
mod formatter;
mod sanitize;

pub use convert::{MarkdownConverter, OutputMode, PulldownConverter};
pub use filter::{
    FilterPipeline, HtmlEscapeFilter, MarkdownFilter, NewlineFilter, SanitizeFilter, TextFilter,
};
pub use formatter::Formatter;
pub use sanitize::{AmmoniaSanitizer, HtmlSanitizer, SanitizePolicy};
