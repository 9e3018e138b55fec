#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Field rendering tests.
//!
//! Uses recording fakes to pin down composition order, and the real
//! pulldown-cmark/ammonia pair for end-to-end scenarios.

use std::sync::Arc;

use fieldmark_kernel::content::{
    AmmoniaSanitizer, HtmlSanitizer, MarkdownConverter, PulldownConverter, SanitizePolicy,
};
use fieldmark_kernel::{FieldKind, Formatter, OutputMode, TextField};
use fieldmark_test_utils::{
    BLANK_SAMPLES, Call, CallLog, WrappingConverter, WrappingSanitizer, XSS_SAMPLES,
    echo_formatter, recording_formatter,
};

#[test]
fn test_blank_input_skips_collaborators() {
    let log = CallLog::new();
    let formatter = recording_formatter(&log);
    for kind in FieldKind::ALL {
        for blank in BLANK_SAMPLES {
            assert_eq!(TextField::new(kind, *blank).render(&formatter), "");
        }
    }
    assert!(log.is_empty());
}

#[test]
fn test_sanitized_render_is_sanitize_of_convert() {
    let log = CallLog::new();
    let formatter = recording_formatter(&log);
    let input = "Hello *world*";

    let output = TextField::markdown(input).render(&formatter);

    let converted = WrappingConverter::expected(input, OutputMode::Xhtml);
    assert_eq!(output, WrappingSanitizer::expected(&converted));
    assert_eq!(
        log.calls(),
        vec![
            Call::Convert {
                input: input.to_string(),
                mode: OutputMode::Xhtml,
            },
            Call::Sanitize { input: converted },
        ]
    );
}

#[test]
fn test_raw_render_is_convert_only() {
    let log = CallLog::new();
    let formatter = recording_formatter(&log);
    let input = "<b>raw</b>";

    let output = TextField::raw_markdown(input).render_with(&formatter, OutputMode::Html4);

    assert_eq!(output, WrappingConverter::expected(input, OutputMode::Html4));
    assert_eq!(
        log.calls(),
        vec![Call::Convert {
            input: input.to_string(),
            mode: OutputMode::Html4,
        }]
    );
}

#[test]
fn test_html_kind_sanitizes_only() {
    let log = CallLog::new();
    let formatter = recording_formatter(&log);

    let output = TextField::html("<p>x</p>").render(&formatter);

    assert_eq!(output, WrappingSanitizer::expected("<p>x</p>"));
    assert_eq!(log.calls().len(), 1);
    assert!(matches!(log.calls()[0], Call::Sanitize { .. }));
}

#[test]
fn test_text_kind_uses_no_collaborators() {
    let log = CallLog::new();
    let formatter = recording_formatter(&log);

    let output = TextField::text("<i>x</i>").render(&formatter);

    assert_eq!(output, "&lt;i&gt;x&lt;/i&gt;");
    assert!(log.is_empty());
}

#[test]
fn test_render_defaults_to_xhtml() {
    let log = CallLog::new();
    let formatter = recording_formatter(&log);
    TextField::raw_markdown("x").render(&formatter);
    assert_eq!(
        log.calls(),
        vec![Call::Convert {
            input: "x".to_string(),
            mode: OutputMode::Xhtml,
        }]
    );
}

#[test]
fn test_echo_converter_isolates_sanitizer() {
    let formatter = echo_formatter(Arc::new(AmmoniaSanitizer::new()));
    let output = TextField::markdown("<p>ok</p><script>bad()</script>").render(&formatter);
    assert_eq!(output, "<p>ok</p>");
}

#[test]
fn test_sanitized_matches_manual_composition() {
    let formatter = Formatter::default();
    let converter = PulldownConverter;
    let sanitizer = AmmoniaSanitizer::new();
    for input in [
        "# Heading\n\nSome *text* with `code`.",
        "- one\n- two\n\n> quoted <em>html</em>",
        "<script>alert(1)</script>",
        "[link](javascript:alert(1))",
        "![img](/a.png)\n\nline  \nbreak",
    ] {
        for mode in [OutputMode::Xhtml, OutputMode::Html4] {
            let expected = sanitizer.sanitize(&converter.convert(input, mode));
            assert_eq!(
                TextField::markdown(input).render_with(&formatter, mode),
                expected,
                "input: {input:?}, mode: {mode}"
            );
            assert_eq!(
                TextField::raw_markdown(input).render_with(&formatter, mode),
                converter.convert(input, mode),
            );
        }
    }
}

#[test]
fn test_xss_samples_are_neutralized() {
    let formatter = Formatter::default();
    for input in XSS_SAMPLES {
        let output = TextField::markdown(*input).render(&formatter);
        let lower = output.to_lowercase();
        assert!(!lower.contains("<script"), "script survived: {output}");
        assert!(!lower.contains("javascript:"), "js url survived: {output}");
        assert!(!lower.contains("onerror"), "handler survived: {output}");
        assert!(!lower.contains("onclick"), "handler survived: {output}");
        assert!(!lower.contains("<iframe"), "iframe survived: {output}");
    }
}

#[test]
fn test_scenarios() {
    let formatter = Formatter::default();

    assert_eq!(TextField::raw_markdown("").render(&formatter), "");
    assert_eq!(TextField::markdown("").render(&formatter), "");

    let raw = TextField::raw_markdown("**bold**").render(&formatter);
    assert_eq!(raw.trim(), "<p><strong>bold</strong></p>");
    assert_eq!(TextField::markdown("**bold**").render(&formatter), raw);

    let script = "<script>alert(1)</script>";
    assert!(TextField::raw_markdown(script).render(&formatter).contains(script));
    assert!(
        TextField::markdown(script)
            .render(&formatter)
            .trim()
            .is_empty()
    );

    let link = TextField::markdown("[link](javascript:alert(1))").render(&formatter);
    assert!(link.contains("<a"));
    assert!(!link.contains("javascript:"));
}

#[test]
fn test_custom_policy_flows_through_formatter() {
    let policy = SanitizePolicy {
        removed_tags: vec!["strong".to_string()],
        ..Default::default()
    };
    let formatter = Formatter::with_policy(policy).unwrap();
    let output = TextField::markdown("**bold** text").render(&formatter);
    assert!(!output.contains("<strong>"));
    assert!(output.contains("bold text"));
}
