#![allow(dead_code)]
use cargo_e_msg::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub const CANNOT_BORROW_MUT_MORE_THAN: &str =
    "cannot borrow `xpto` as mutable more than once at a time";

/// Path to a JSON fixture under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a JSON fixture under `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {}", name, e))
}

/// A span's source info; an empty `label` means "no caption".
pub fn span_info(
    path: &str,
    range: (usize, usize, usize, usize),
    severity: Severity,
    label: &str,
) -> SpanInfo {
    let label = if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    };
    SpanInfo::new(
        path,
        SourceRange::new(range.0, range.1, range.2, range.3),
        severity,
        label,
    )
}

pub fn display(
    path: &str,
    range: (usize, usize, usize, usize),
    severity: Severity,
    text: &str,
) -> DisplayMessage {
    DisplayMessage::new(
        path,
        SourceRange::new(range.0, range.1, range.2, range.3),
        severity,
        text,
    )
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Parses `input`, asserting that it holds exactly one diagnostic.
pub fn parse_single(input: &str) -> MainMessage {
    let mut messages = parse_structured_str(input).expect("fixture should parse");
    assert_eq!(messages.len(), 1, "expected a single diagnostic");
    messages.remove(0)
}
