//! HTML sanitization.
//!
//! Provides the sanitizer strategy trait, the `ammonia`-backed
//! implementation, and the TOML-loadable allow-list adjustments applied
//! on top of ammonia's defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// Tags ammonia strips together with their content. They can never be
/// added to the allow-list.
const CONTENT_CLEARED_TAGS: &[&str] = &["script", "style"];

/// Removes script-bearing and otherwise unsafe markup from HTML.
///
/// Implementations must be total and idempotent:
/// `sanitize(&sanitize(h)) == sanitize(h)`.
pub trait HtmlSanitizer: Send + Sync {
    /// Sanitizer name for debugging.
    fn name(&self) -> &str;

    /// Return a sanitized copy of `html`.
    fn sanitize(&self, html: &str) -> String;
}

/// Adjustments to ammonia's default allow-list.
///
/// An empty policy sanitizes exactly like `ammonia::clean`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizePolicy {
    /// Tags to allow in addition to the defaults.
    pub extra_tags: Vec<String>,
    /// Default tags to disallow.
    pub removed_tags: Vec<String>,
    /// URL schemes to allow in addition to the defaults.
    pub extra_url_schemes: Vec<String>,
    /// Default URL schemes to disallow.
    pub removed_url_schemes: Vec<String>,
    /// Override for the `rel` attribute added to links. `None` keeps
    /// ammonia's `noopener noreferrer`.
    pub link_rel: Option<String>,
    /// Whether HTML comments are stripped (ammonia default: true).
    pub strip_comments: Option<bool>,
}

impl SanitizePolicy {
    /// Parse a policy from TOML source and validate it.
    pub fn from_toml_str(source: &str) -> FieldResult<Self> {
        let policy: Self =
            toml::from_str(source).map_err(|e| FieldError::InvalidPolicy(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sanitize policy {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("failed to parse sanitize policy {}", path.display()))
    }

    /// Reject policies ammonia would refuse at clean time.
    pub fn validate(&self) -> FieldResult<()> {
        for tag in &self.extra_tags {
            let lower = tag.to_ascii_lowercase();
            if CONTENT_CLEARED_TAGS.contains(&lower.as_str()) {
                return Err(FieldError::InvalidPolicy(format!(
                    "tag '{tag}' cannot be allowed"
                )));
            }
            if lower.trim().is_empty() {
                return Err(FieldError::InvalidPolicy("empty tag name".to_string()));
            }
        }
        Ok(())
    }

    /// Check whether the policy changes anything.
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }
}

/// Sanitizer backed by `ammonia`.
#[derive(Debug, Clone, Default)]
pub struct AmmoniaSanitizer {
    policy: SanitizePolicy,
}

impl AmmoniaSanitizer {
    /// Create a sanitizer using ammonia's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sanitizer with a validated policy.
    pub fn with_policy(policy: SanitizePolicy) -> FieldResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &SanitizePolicy {
        &self.policy
    }

    fn builder(&self) -> ammonia::Builder<'_> {
        let policy = &self.policy;
        let mut builder = ammonia::Builder::default();
        builder
            .add_tags(policy.extra_tags.iter())
            .rm_tags(policy.removed_tags.iter())
            .add_url_schemes(policy.extra_url_schemes.iter())
            .rm_url_schemes(policy.removed_url_schemes.iter());
        if let Some(rel) = policy.link_rel.as_deref() {
            builder.link_rel(Some(rel).filter(|r| !r.is_empty()));
        }
        if let Some(strip) = policy.strip_comments {
            builder.strip_comments(strip);
        }
        builder
    }
}

impl HtmlSanitizer for AmmoniaSanitizer {
    fn name(&self) -> &str {
        "ammonia"
    }

    fn sanitize(&self, html: &str) -> String {
        self.builder().clean(html).to_string()
    }
}
