//! Field type registry.
//!
//! Maps symbolic column type names ("markdown", "raw_markdown", ...) to
//! field kinds. The registry is populated once at startup and then shared
//! by reference; there is no way to mutate it through a shared borrow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::value::{FieldKind, TextField};
use crate::error::{FieldError, FieldResult};

/// Definition of a single field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTypeDefinition {
    /// Machine name of the field type (e.g. "markdown").
    pub type_name: String,
    /// Human-readable label (e.g. "Markdown").
    pub label: String,
    /// Render variant values of this type use.
    pub kind: FieldKind,
}

impl FieldTypeDefinition {
    /// Definition for a kind under its own name and label.
    pub fn standard(kind: FieldKind) -> Self {
        Self {
            type_name: kind.type_name().to_string(),
            label: kind.label().to_string(),
            kind,
        }
    }

    /// Definition registering `kind` under a custom name.
    pub fn alias(type_name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            type_name: type_name.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

/// Registry of field type definitions, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct FieldTypeRegistry {
    types: HashMap<String, FieldTypeDefinition>,
}

impl FieldTypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the standard field types.
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        registry.register_standard_types();
        info!(count = registry.len(), "field types registered");
        registry
    }

    /// Register the standard types: text, html, raw_markdown, markdown.
    ///
    /// `raw_markdown` is always registered before `markdown`.
    pub fn register_standard_types(&mut self) {
        for kind in FieldKind::ALL {
            self.register(FieldTypeDefinition::standard(kind));
        }
    }

    /// Register a single field type definition. The last registration
    /// for a name wins.
    pub fn register(&mut self, definition: FieldTypeDefinition) {
        let name = definition.type_name.clone();
        if let Some(previous) = self.types.insert(name.clone(), definition) {
            debug!(type_name = %name, previous = %previous.kind, "field type replaced");
        } else {
            debug!(type_name = %name, "field type registered");
        }
    }

    /// Resolve a type name to its definition.
    pub fn resolve(&self, type_name: &str) -> FieldResult<&FieldTypeDefinition> {
        self.types
            .get(type_name)
            .ok_or_else(|| FieldError::unknown_type(type_name))
    }

    /// Resolve a type name, falling back to `fallback` on a miss.
    pub fn resolve_or(&self, type_name: &str, fallback: &str) -> FieldResult<&FieldTypeDefinition> {
        match self.resolve(type_name) {
            Ok(def) => Ok(def),
            Err(_) => {
                warn!(type_name, fallback, "unknown field type, using fallback");
                self.resolve(fallback)
            }
        }
    }

    /// Resolve `type_name` and wrap `content` as a field of that type.
    pub fn hydrate(&self, type_name: &str, content: impl Into<String>) -> FieldResult<TextField> {
        let def = self.resolve(type_name)?;
        Ok(TextField::new(def.kind, content))
    }

    /// Look up a field type by name.
    pub fn get(&self, type_name: &str) -> Option<&FieldTypeDefinition> {
        self.types.get(type_name)
    }

    /// Check whether a field type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Return the number of registered field types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// List all registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// List all definitions, sorted by type name.
    pub fn definitions(&self) -> Vec<&FieldTypeDefinition> {
        let mut defs: Vec<&FieldTypeDefinition> = self.types.values().collect();
        defs.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        defs
    }
}
