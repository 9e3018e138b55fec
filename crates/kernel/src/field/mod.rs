//! Field types.
//!
//! This module provides:
//! - TextField: A stored text value tagged with its render variant
//! - FieldKind: The render variants (text, html, raw_markdown, markdown)
//! - FieldTypeRegistry: Startup-time mapping from type names to kinds

mod type_registry;
mod value;

pub use type_registry::{FieldTypeDefinition, FieldTypeRegistry};
pub use value::{FieldKind, TextField, is_blank};
