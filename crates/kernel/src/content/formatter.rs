//! Shared rendering collaborators.

use std::fmt;
use std::sync::Arc;

use super::convert::{MarkdownConverter, PulldownConverter};
use super::sanitize::{AmmoniaSanitizer, HtmlSanitizer, SanitizePolicy};
use crate::error::FieldResult;

/// The converter and sanitizer every field renders through.
///
/// Built once at startup and passed by reference; cloning shares the
/// underlying strategies.
#[derive(Clone)]
pub struct Formatter {
    converter: Arc<dyn MarkdownConverter>,
    sanitizer: Arc<dyn HtmlSanitizer>,
}

impl Formatter {
    /// Create a formatter from explicit strategies.
    pub fn new(converter: Arc<dyn MarkdownConverter>, sanitizer: Arc<dyn HtmlSanitizer>) -> Self {
        Self {
            converter,
            sanitizer,
        }
    }

    /// Create the production formatter with a custom sanitize policy.
    pub fn with_policy(policy: SanitizePolicy) -> FieldResult<Self> {
        Ok(Self::new(
            Arc::new(PulldownConverter),
            Arc::new(AmmoniaSanitizer::with_policy(policy)?),
        ))
    }

    pub fn converter(&self) -> &Arc<dyn MarkdownConverter> {
        &self.converter
    }

    pub fn sanitizer(&self) -> &Arc<dyn HtmlSanitizer> {
        &self.sanitizer
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Arc::new(PulldownConverter), Arc::new(AmmoniaSanitizer::new()))
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("converter", &self.converter.name())
            .field("sanitizer", &self.sanitizer.name())
            .finish()
    }
}
