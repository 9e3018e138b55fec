//! Fieldmark Kernel Library
//!
//! Text field value types that render stored text to HTML: plain text,
//! sanitized HTML, raw Markdown, and sanitized Markdown. The `fieldmark`
//! binary wraps this library as a command-line renderer.

pub mod config;
pub mod content;
pub mod error;
pub mod field;

pub use config::Config;
pub use content::{Formatter, OutputMode};
pub use error::{FieldError, FieldResult};
pub use field::{FieldKind, FieldTypeDefinition, FieldTypeRegistry, TextField};
