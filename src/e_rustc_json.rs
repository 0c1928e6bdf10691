//! Raw rustc diagnostic JSON, as emitted by `--error-format=json` and wrapped
//! by cargo's `--message-format=json`.
//!
//! Only the fields the message tree needs are declared; everything else in the
//! record (`rendered`, `byte_start`, `text`, suggestions, ...) is ignored.
//! Nullable fields are `Option` so that schema drift in the emitter does not
//! reject an otherwise usable record.

use serde::Deserialize;

/// Cargo reason that carries a compiler diagnostic in its `message` field.
pub(crate) const COMPILER_MESSAGE_REASON: &str = "compiler-message";

/// The root diagnostic record emitted by the compiler.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub(crate) struct RawDiagnostic {
    /// The primary error message.
    pub message: String,
    #[serde(default)]
    pub code: Option<RawDiagnosticCode>,
    /// "error: internal compiler error", "error", "warning", "note", "help".
    pub level: String,
    #[serde(default)]
    pub spans: Option<Vec<RawSpan>>,
    /// Associated diagnostic messages.
    #[serde(default)]
    pub children: Option<Vec<RawChild>>,
}

/// The `code` field: `{"code": "E0425", "explanation": ...}` from rustc, a
/// bare string from some emitters, anything else is ignored.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub(crate) enum RawDiagnosticCode {
    Object {
        #[serde(default)]
        code: Option<String>,
    },
    Bare(String),
    Other(serde_json::Value),
}

impl RawDiagnosticCode {
    pub fn into_code(self) -> Option<String> {
        match self {
            RawDiagnosticCode::Object { code } => code,
            RawDiagnosticCode::Bare(code) => Some(code),
            RawDiagnosticCode::Other(value) => {
                tracing::warn!("ignoring diagnostic code of unexpected shape: {}", value);
                None
            }
        }
    }
}

/// A child diagnostic; only its text and level are kept. Children missing
/// either are dropped by the parser.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub(crate) struct RawChild {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

/// Span information of a diagnostic item.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub(crate) struct RawSpan {
    #[serde(default)]
    pub file_name: Option<String>,
    /// 1-based.
    pub line_start: usize,
    pub line_end: usize,
    /// 1-based, character offset.
    pub column_start: usize,
    pub column_end: usize,
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub label: Option<String>,
    /// Macro invocation that created the code at this span, if any.
    #[serde(default)]
    pub expansion: Option<Box<RawExpansion>>,
}

/// Span information for macro expansions.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub(crate) struct RawExpansion {
    /// Span where the macro was applied; it may itself come from a macro.
    #[serde(default)]
    pub span: Option<RawSpan>,
    /// Span where the macro was defined, if known.
    #[serde(default)]
    pub def_site_span: Option<RawSpan>,
}
