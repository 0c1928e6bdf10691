//! Tree model of a parsed compiler diagnostic.

use serde::Serialize;
use std::fmt;

use crate::e_location::{display_path, SourceRange, STD_MACROS_PATH};
use crate::e_severity::Severity;

/// A location-anchored message, ready to be shown as an editor problem
/// annotation.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
pub struct DisplayMessage {
    /// Source path, or [`STD_MACROS_PATH`] for compiler-internal locations.
    pub path: String,
    pub range: SourceRange,
    pub severity: Severity,
    pub text: String,
}

impl DisplayMessage {
    pub fn new(
        path: impl Into<String>,
        range: SourceRange,
        severity: Severity,
        text: impl Into<String>,
    ) -> Self {
        DisplayMessage {
            path: path.into(),
            range,
            severity,
            text: text.into(),
        }
    }
}

impl fmt::Display for DisplayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            display_path(&self.path),
            self.range.start_line,
            self.range.start_column,
            self.severity,
            self.text
        )
    }
}

/// Location, severity and caption of a single span.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
pub struct SpanInfo {
    pub path: String,
    pub range: SourceRange,
    pub severity: Severity,
    /// `None` when the compiler gave no caption for this span.
    pub label: Option<String>,
}

impl SpanInfo {
    pub fn new(
        path: impl Into<String>,
        range: SourceRange,
        severity: Severity,
        label: Option<String>,
    ) -> Self {
        SpanInfo {
            path: path.into(),
            range,
            severity,
            label,
        }
    }
}

/// One source-range annotation of a diagnostic.
///
/// `def_site_msg` and `expansion_msg` are full nodes themselves, so chains of
/// macro-in-macro expansions nest to arbitrary depth.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
pub struct SubMessage {
    pub source_info: SpanInfo,
    pub is_primary: bool,
    /// The macro site surfaced next to this span when it is primary: the
    /// invocation this span was expanded from (rustc `expansion.span`).
    pub def_site_msg: Option<Box<SubMessage>>,
    /// Where that macro was defined (rustc `expansion.def_site_span`). Kept in
    /// the tree, never flattened.
    pub expansion_msg: Option<Box<SubMessage>>,
}

impl SubMessage {
    /// A primary span without macro information.
    pub fn new(source_info: SpanInfo) -> Self {
        SubMessage::with_primary(source_info, true)
    }

    pub fn with_primary(source_info: SpanInfo, is_primary: bool) -> Self {
        SubMessage {
            source_info,
            is_primary,
            def_site_msg: None,
            expansion_msg: None,
        }
    }

    pub fn with_macro_sites(
        source_info: SpanInfo,
        is_primary: bool,
        def_site_msg: Option<SubMessage>,
        expansion_msg: Option<SubMessage>,
    ) -> Self {
        SubMessage {
            source_info,
            is_primary,
            def_site_msg: def_site_msg.map(Box::new),
            expansion_msg: expansion_msg.map(Box::new),
        }
    }

    /// The label, if present and non-empty.
    pub fn label(&self) -> Option<&str> {
        self.source_info
            .label
            .as_deref()
            .filter(|label| !label.is_empty())
    }

    /// Number of nested nodes below this one, following both macro links.
    pub fn nested_depth(&self) -> usize {
        let def_site = self.def_site_msg.as_ref().map_or(0, |m| 1 + m.nested_depth());
        let expansion = self
            .expansion_msg
            .as_ref()
            .map_or(0, |m| 1 + m.nested_depth());
        def_site.max(expansion)
    }
}

/// A single compiler diagnostic record.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
pub struct MainMessage {
    /// Top-level text and severity. The path is always [`STD_MACROS_PATH`] and
    /// the range a placeholder; neither carries meaning.
    pub source_info: DisplayMessage,
    /// Error code such as `E0425`. Never `Some("")`.
    pub code: Option<String>,
    /// Note and help texts in compiler order. Never `Some(vec![])`.
    pub notes: Option<Vec<String>>,
    pub spans: Vec<SubMessage>,
}

impl MainMessage {
    pub fn new(
        text: impl Into<String>,
        severity: Severity,
        code: Option<String>,
        notes: Option<Vec<String>>,
        spans: Vec<SubMessage>,
    ) -> Self {
        MainMessage {
            source_info: DisplayMessage::new(
                STD_MACROS_PATH,
                SourceRange::placeholder(),
                severity,
                text,
            ),
            code: code.filter(|code| !code.is_empty()),
            notes: notes.filter(|notes| !notes.is_empty()),
            spans,
        }
    }

    pub fn text(&self) -> &str {
        &self.source_info.text
    }

    pub fn severity(&self) -> Severity {
        self.source_info.severity
    }
}
