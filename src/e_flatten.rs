//! Flattens a [`MainMessage`] tree into display messages.
//!
//! One message is produced per span, in span order. A primary span that was
//! produced by a macro is followed by one extra informational message at the
//! macro's invocation site (`def_site_msg`). Deeper macro chains stay in the
//! tree and are not unfolded here.

use crate::e_message::{DisplayMessage, MainMessage, SubMessage};
use crate::e_severity::Severity;

impl MainMessage {
    /// `text [code]:` when a code is present, `text:` otherwise.
    pub fn header(&self) -> String {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => format!("{} [{}]:", self.text(), code),
            _ => format!("{}:", self.text()),
        }
    }

    /// The header followed by one line per note.
    pub fn header_with_notes(&self) -> String {
        let mut text = self.header();
        for note in self.notes.iter().flatten() {
            text.push('\n');
            text.push_str(note);
        }
        text
    }

    /// Produces the ordered display messages for this diagnostic.
    ///
    /// # Example
    /// ```
    /// use cargo_e_msg::e_location::SourceRange;
    /// use cargo_e_msg::e_message::{MainMessage, SpanInfo, SubMessage};
    /// use cargo_e_msg::e_severity::Severity;
    ///
    /// let span = SubMessage::new(SpanInfo::new(
    ///     "src/main.rs",
    ///     SourceRange::new(8, 19, 8, 23),
    ///     Severity::Error,
    ///     Some("unresolved name".to_string()),
    /// ));
    /// let msg = MainMessage::new(
    ///     "unresolved name `xpto`",
    ///     Severity::Error,
    ///     Some("E0425".to_string()),
    ///     None,
    ///     vec![span],
    /// );
    /// let out = msg.retrieve_display_messages();
    /// assert_eq!(out.len(), 1);
    /// assert_eq!(out[0].text, "unresolved name `xpto` [E0425]:\nunresolved name");
    /// ```
    pub fn retrieve_display_messages(&self) -> Vec<DisplayMessage> {
        let mut messages = Vec::with_capacity(self.spans.len());
        let header_with_notes = self.header_with_notes();

        for span in &self.spans {
            messages.push(self.span_message(span, &header_with_notes));

            if !span.is_primary {
                continue;
            }
            if let Some(def_site) = &span.def_site_msg {
                messages.push(DisplayMessage::new(
                    def_site.source_info.path.clone(),
                    def_site.source_info.range,
                    Severity::Info,
                    header_with_notes.clone(),
                ));
            }
        }
        messages
    }

    fn span_message(&self, span: &SubMessage, header_with_notes: &str) -> DisplayMessage {
        let (severity, text) = if span.is_primary {
            let mut text = header_with_notes.to_string();
            if let Some(label) = span.label() {
                text.push('\n');
                text.push_str(label);
            }
            (self.severity(), text)
        } else {
            (
                span.source_info.severity,
                span.label().unwrap_or_default().to_string(),
            )
        };
        DisplayMessage::new(
            span.source_info.path.clone(),
            span.source_info.range,
            severity,
            text,
        )
    }
}

/// Flattens every message in order.
pub fn retrieve_all_display_messages(messages: &[MainMessage]) -> Vec<DisplayMessage> {
    messages
        .iter()
        .flat_map(MainMessage::retrieve_display_messages)
        .collect()
}
