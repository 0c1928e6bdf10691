//! Builds [`MainMessage`] trees from a stream of rustc JSON diagnostics.

use serde_json::Value;
use std::io::Read;
use tracing::{debug, trace, warn};

use crate::e_location::{is_pseudo_file, SourceRange, STD_MACROS_PATH};
use crate::e_message::{MainMessage, SpanInfo, SubMessage};
use crate::e_rustc_json::{RawDiagnostic, RawDiagnosticCode, RawSpan, COMPILER_MESSAGE_REASON};
use crate::e_severity::Severity;

/// Error returned when a diagnostic stream cannot be parsed.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Record `record` (1-based), starting at byte `offset`, is not valid JSON
    /// or lacks a mandatory field.
    #[error("malformed diagnostic record #{record} at byte {offset}: {source}")]
    Malformed {
        record: usize,
        offset: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read diagnostic stream: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// The 1-based index of the offending record, if the failure is tied to one.
    pub fn record(&self) -> Option<usize> {
        match self {
            ParseError::Malformed { record, .. } => Some(*record),
            ParseError::Io(_) => None,
        }
    }
}

/// Reads `reader` to the end and parses every diagnostic record in it.
///
/// See [`parse_structured_str`].
pub fn parse_structured_messages<R: Read>(mut reader: R) -> Result<Vec<MainMessage>, ParseError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_structured_str(&input)
}

/// Parses zero or more whitespace-separated JSON diagnostic records.
///
/// Records may be bare rustc diagnostics or cargo `compiler-message`
/// envelopes; other cargo messages are skipped. The result keeps input order.
/// Any malformed record fails the whole call.
///
/// # Example
/// ```
/// use cargo_e_msg::e_msg_parser::parse_structured_str;
///
/// let messages = parse_structured_str("  \n").unwrap();
/// assert!(messages.is_empty());
///
/// let json = r#"{"message":"unused variable: `x`","code":null,"level":"warning","spans":[]}"#;
/// let messages = parse_structured_str(json).unwrap();
/// assert_eq!(messages[0].text(), "unused variable: `x`");
/// assert_eq!(messages[0].code, None);
/// ```
pub fn parse_structured_str(input: &str) -> Result<Vec<MainMessage>, ParseError> {
    let mut messages = Vec::new();
    let mut stream = serde_json::Deserializer::from_str(input).into_iter::<Value>();
    let mut record = 0;

    loop {
        let offset = stream.byte_offset();
        let value = match stream.next() {
            Some(value) => value,
            None => break,
        };
        record += 1;
        let malformed = |source| ParseError::Malformed {
            record,
            offset,
            source,
        };

        let value = value.map_err(malformed)?;
        let Some(value) = unwrap_cargo_envelope(value) else {
            continue;
        };
        let raw: RawDiagnostic = serde_json::from_value(value).map_err(malformed)?;
        trace!("record #{}: {} {:?}", record, raw.level, raw.message);
        messages.push(build_main_message(raw));
    }

    debug!("parsed {} diagnostic(s) from {} record(s)", messages.len(), record);
    Ok(messages)
}

/// Strips cargo's `{"reason": ..., "message": ...}` wrapper.
///
/// Returns `None` for cargo messages that carry no diagnostic.
fn unwrap_cargo_envelope(mut value: Value) -> Option<Value> {
    let reason = match value.get("reason").and_then(Value::as_str) {
        Some(reason) => reason.to_string(),
        None => return Some(value),
    };
    if reason != COMPILER_MESSAGE_REASON {
        debug!("skipping cargo message with reason {:?}", reason);
        return None;
    }
    match value.get_mut("message").map(Value::take) {
        Some(message) => Some(message),
        // Let the diagnostic deserializer report the missing fields.
        None => Some(value),
    }
}

fn is_note_level(level: &str) -> bool {
    matches!(level, "note" | "help" | "failure-note")
}

fn build_main_message(raw: RawDiagnostic) -> MainMessage {
    let severity = Severity::from_level(&raw.level);
    let code = raw.code.and_then(RawDiagnosticCode::into_code);
    let notes: Vec<String> = raw
        .children
        .unwrap_or_default()
        .into_iter()
        .filter_map(|child| match (child.level, child.message) {
            (Some(level), Some(message)) if is_note_level(&level) => Some(message),
            (Some(_), Some(_)) => None,
            _ => {
                warn!("skipping child diagnostic without level or message");
                None
            }
        })
        .collect();
    let spans = raw
        .spans
        .unwrap_or_default()
        .into_iter()
        .map(|span| build_sub_message(span, severity))
        .collect();

    MainMessage::new(raw.message, severity, code, Some(notes), spans)
}

fn build_sub_message(span: RawSpan, main_severity: Severity) -> SubMessage {
    let is_primary = span.is_primary.unwrap_or(true);
    let severity = if is_primary {
        main_severity
    } else {
        Severity::Info
    };
    let source_info = SpanInfo::new(
        normalize_path(span.file_name),
        SourceRange::new(
            span.line_start,
            span.column_start,
            span.line_end,
            span.column_end,
        ),
        severity,
        span.label.filter(|label| !label.is_empty()),
    );

    // The invocation span is the site surfaced next to a primary span; the
    // macro's own definition is kept in the other slot.
    let (def_site_msg, expansion_msg) = match span.expansion {
        Some(expansion) => {
            let expansion = *expansion;
            (
                expansion
                    .span
                    .map(|invocation| build_sub_message(invocation, main_severity)),
                expansion
                    .def_site_span
                    .map(|definition| build_sub_message(definition, main_severity)),
            )
        }
        None => (None, None),
    };

    SubMessage::with_macro_sites(source_info, is_primary, def_site_msg, expansion_msg)
}

fn normalize_path(file_name: Option<String>) -> String {
    match file_name {
        Some(name) if !is_pseudo_file(&name) => name,
        _ => STD_MACROS_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_artifact_messages_are_skipped() {
        let input = r#"{"reason":"compiler-artifact","package_id":"x","target":{}}
{"reason":"build-finished","success":false}"#;
        assert!(parse_structured_str(input).unwrap().is_empty());
    }

    #[test]
    fn test_cargo_compiler_message_is_unwrapped() {
        let input = r#"{"reason":"compiler-message","package_id":"x","message":{"message":"boom","code":{"code":"E0001","explanation":null},"level":"error","spans":[]}}"#;
        let messages = parse_structured_str(input).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code.as_deref(), Some("E0001"));
    }

    #[test]
    fn test_error_names_offending_record() {
        let input = "{\"message\":\"a\",\"level\":\"error\",\"spans\":[]}\n{\"message\":\"b\"}";
        let err = parse_structured_str(input).unwrap_err();
        assert_eq!(err.record(), Some(2));
        assert!(err.to_string().contains("record #2"));
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = parse_structured_str("{\"message\": ").unwrap_err();
        assert_eq!(err.record(), Some(1));
    }

    #[test]
    fn test_pseudo_and_missing_file_names_become_sentinel() {
        assert_eq!(normalize_path(None), STD_MACROS_PATH);
        assert_eq!(normalize_path(Some("<std macros>".into())), STD_MACROS_PATH);
        assert_eq!(normalize_path(Some("src/main.rs".into())), "src/main.rs");
    }

    #[test]
    fn test_incomplete_children_are_skipped() {
        let input = r#"{"message":"m","level":"error","spans":[],"children":[
            {"message":"x"},
            {"level":"note"},
            {"message":"kept","level":"note","spans":[]}]}"#;
        let messages = parse_structured_str(input).unwrap();
        assert_eq!(messages[0].notes, Some(vec!["kept".to_string()]));
    }

    #[test]
    fn test_bare_string_code_is_accepted() {
        let input = r#"{"message":"m","code":"E0001","level":"error","spans":[]}
{"message":"m","code":7,"level":"error","spans":[]}"#;
        let messages = parse_structured_str(input).unwrap();
        assert_eq!(messages[0].code.as_deref(), Some("E0001"));
        assert_eq!(messages[1].code, None);
    }

    #[test]
    fn test_only_note_and_help_children_become_notes() {
        let input = r#"{"message":"m","level":"error","spans":[],"children":[
            {"message":"a note","level":"note","spans":[],"children":[]},
            {"message":"a warning","level":"warning","spans":[],"children":[]},
            {"message":"a help","level":"help","spans":[],"children":[]}]}"#;
        let messages = parse_structured_str(input).unwrap();
        assert_eq!(
            messages[0].notes,
            Some(vec!["a note".to_string(), "a help".to_string()])
        );
    }
}
