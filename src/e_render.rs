use std::io::IsTerminal;

use crate::e_cli::ColorChoice;
use crate::e_location::display_path;
use crate::e_message::DisplayMessage;
use crate::e_severity::Severity;

/// Decides whether stdout output should be coloured.
pub fn use_color(choice: ColorChoice) -> bool {
    if !cfg!(feature = "color") {
        return false;
    }
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    }
}

/// `path:line:col: severity: text`, with continuation lines indented.
///
/// ```
/// use cargo_e_msg::e_location::SourceRange;
/// use cargo_e_msg::e_message::DisplayMessage;
/// use cargo_e_msg::e_render::render_plain;
/// use cargo_e_msg::e_severity::Severity;
///
/// let msg = DisplayMessage::new("src/main.rs", SourceRange::new(6, 19, 6, 23), Severity::Info, "first");
/// assert_eq!(render_plain(&msg, false), "src/main.rs:6:19: info: first");
/// ```
pub fn render_plain(msg: &DisplayMessage, colorful: bool) -> String {
    let text = msg.text.replace('\n', "\n    ");
    format!(
        "{}:{}:{}: {}: {}",
        display_path(&msg.path),
        msg.range.start_line,
        msg.range.start_column,
        severity_label(msg.severity, colorful),
        text
    )
}

/// One JSON object per message, as consumed by editor integrations.
pub fn render_json(msg: &DisplayMessage) -> serde_json::Result<String> {
    serde_json::to_string(msg)
}

#[cfg(feature = "color")]
fn severity_label(severity: Severity, colorful: bool) -> String {
    use crossterm::style::Stylize;

    if !colorful {
        return severity.to_string();
    }
    let label = severity.as_str();
    match severity {
        Severity::Error => label.red().bold().to_string(),
        Severity::Warning => label.yellow().bold().to_string(),
        Severity::Info => label.cyan().to_string(),
        Severity::Help => label.green().to_string(),
    }
}

#[cfg(not(feature = "color"))]
fn severity_label(severity: Severity, _colorful: bool) -> String {
    severity.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e_location::SourceRange;

    #[test]
    fn test_multiline_text_is_indented() {
        let msg = DisplayMessage::new(
            "",
            SourceRange::new(5, 22, 5, 33),
            Severity::Error,
            "mismatched types [E0308]:\nexpected type `bool`",
        );
        assert_eq!(
            render_plain(&msg, false),
            "<std macros>:5:22: error: mismatched types [E0308]:\n    expected type `bool`"
        );
    }

    #[test]
    fn test_json_shape() {
        let msg = DisplayMessage::new("src/main.rs", SourceRange::new(1, 2, 3, 4), Severity::Help, "t");
        let json: serde_json::Value = serde_json::from_str(&render_json(&msg).unwrap()).unwrap();
        assert_eq!(json["path"], "src/main.rs");
        assert_eq!(json["severity"], "help");
        assert_eq!(json["range"]["start_line"], 1);
        assert_eq!(json["range"]["end_column"], 4);
        assert_eq!(json["text"], "t");
    }

    #[test]
    fn test_never_color() {
        assert!(!use_color(ColorChoice::Never));
    }
}
