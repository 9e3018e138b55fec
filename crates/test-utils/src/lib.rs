//! Fieldmark test utilities.
//!
//! Helpers for integration testing: fake converters and sanitizers that
//! record their calls, formatter builders, and sample inputs.

use std::sync::Arc;

use fieldmark_kernel::content::{HtmlSanitizer, MarkdownConverter, OutputMode};
use fieldmark_kernel::Formatter;
use parking_lot::Mutex;

/// Inputs that must never survive sanitization with script intact.
pub const XSS_SAMPLES: &[&str] = &[
    "<script>alert(1)</script>",
    "[link](javascript:alert(1))",
    "<img src=x onerror=alert(1)>",
    "<a href=\"javascript:alert(1)\">x</a>",
    "<div onclick=\"alert(1)\">click</div>",
    "<iframe src=\"https://evil.example\"></iframe>",
];

/// Blank inputs that must render as the empty string.
pub const BLANK_SAMPLES: &[&str] = &["", " ", "\t", "\n\n", "  \r\n  "];

/// A single recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Convert { input: String, mode: OutputMode },
    Sanitize { input: String },
}

/// Shared, ordered log of collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.calls.lock().push(call);
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

/// Converter that returns its input unchanged.
#[derive(Debug, Clone, Default)]
pub struct EchoConverter {
    log: CallLog,
}

impl EchoConverter {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl MarkdownConverter for EchoConverter {
    fn name(&self) -> &str {
        "echo"
    }

    fn convert(&self, text: &str, mode: OutputMode) -> String {
        self.log.push(Call::Convert {
            input: text.to_string(),
            mode,
        });
        text.to_string()
    }
}

/// Converter that wraps its input in `<md mode="...">` so tests can see
/// exactly what it produced.
#[derive(Debug, Clone, Default)]
pub struct WrappingConverter {
    log: CallLog,
}

impl WrappingConverter {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    /// The output this converter produces for `text`.
    pub fn expected(text: &str, mode: OutputMode) -> String {
        format!("<md mode=\"{mode}\">{text}</md>")
    }
}

impl MarkdownConverter for WrappingConverter {
    fn name(&self) -> &str {
        "wrapping"
    }

    fn convert(&self, text: &str, mode: OutputMode) -> String {
        self.log.push(Call::Convert {
            input: text.to_string(),
            mode,
        });
        Self::expected(text, mode)
    }
}

/// Sanitizer that wraps its input in `[clean]...[/clean]`.
///
/// Deliberately not idempotent, so double sanitization shows up in output.
#[derive(Debug, Clone, Default)]
pub struct WrappingSanitizer {
    log: CallLog,
}

impl WrappingSanitizer {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    /// The output this sanitizer produces for `html`.
    pub fn expected(html: &str) -> String {
        format!("[clean]{html}[/clean]")
    }
}

impl HtmlSanitizer for WrappingSanitizer {
    fn name(&self) -> &str {
        "wrapping"
    }

    fn sanitize(&self, html: &str) -> String {
        self.log.push(Call::Sanitize {
            input: html.to_string(),
        });
        Self::expected(html)
    }
}

/// Formatter whose collaborators both record into `log`.
pub fn recording_formatter(log: &CallLog) -> Formatter {
    Formatter::new(
        Arc::new(WrappingConverter::new(log.clone())),
        Arc::new(WrappingSanitizer::new(log.clone())),
    )
}

/// Formatter with an echo converter and a real sanitizer, isolating
/// sanitizer behavior from Markdown conversion.
pub fn echo_formatter(sanitizer: Arc<dyn HtmlSanitizer>) -> Formatter {
    Formatter::new(Arc::new(EchoConverter::default()), sanitizer)
}
