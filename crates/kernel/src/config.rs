//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::content::{Formatter, OutputMode, SanitizePolicy};
use crate::error::FieldResult;
use crate::field::{FieldTypeDefinition, FieldTypeRegistry, TextField};

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Output mode for void elements (default: xhtml).
    pub output_mode: OutputMode,

    /// Path to a TOML sanitize policy. When None, ammonia's defaults apply.
    pub policy_file: Option<PathBuf>,

    /// Type name used when a requested field type is not registered.
    pub fallback_type: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output_mode = lookup("FIELDMARK_OUTPUT_MODE")
            .map(|v| v.parse::<OutputMode>())
            .transpose()
            .context("FIELDMARK_OUTPUT_MODE must be 'xhtml' or 'html4'")?
            .unwrap_or_default();

        let policy_file = lookup("FIELDMARK_POLICY_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let fallback_type = lookup("FIELDMARK_FALLBACK_TYPE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            output_mode,
            policy_file,
            fallback_type,
        })
    }

    /// Load the configured sanitize policy, or the default when none is set.
    pub fn sanitize_policy(&self) -> Result<SanitizePolicy> {
        match &self.policy_file {
            Some(path) => SanitizePolicy::load(path),
            None => Ok(SanitizePolicy::default()),
        }
    }

    /// Build the formatter described by this configuration.
    pub fn formatter(&self) -> Result<Formatter> {
        let policy = self.sanitize_policy()?;
        Formatter::with_policy(policy).context("invalid sanitize policy")
    }

    /// Resolve a field type, honoring the configured fallback type.
    pub fn resolve_type<'r>(
        &self,
        registry: &'r FieldTypeRegistry,
        type_name: &str,
    ) -> FieldResult<&'r FieldTypeDefinition> {
        match &self.fallback_type {
            Some(fallback) => registry.resolve_or(type_name, fallback),
            None => registry.resolve(type_name),
        }
    }

    /// Hydrate raw input bytes as a field of the configured type.
    pub fn hydrate(
        &self,
        registry: &FieldTypeRegistry,
        type_name: &str,
        bytes: Vec<u8>,
    ) -> FieldResult<TextField> {
        let definition = self.resolve_type(registry, type_name)?;
        TextField::from_bytes(definition.kind, bytes)
    }
}
