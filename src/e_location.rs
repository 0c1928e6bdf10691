use serde::Serialize;
use std::fmt;

/// Path used for locations that do not belong to a real source file.
///
/// rustc reports code generated inside standard macros with a pseudo file name
/// such as `<std macros>`, or with no file name at all. Those locations are
/// normalized to the empty string. Consumers should treat this value as
/// "compiler internal" and never as an actual file on disk; see
/// [`display_path`] for the rendering used by this crate.
pub const STD_MACROS_PATH: &str = "";

/// How [`STD_MACROS_PATH`] is rendered for humans.
pub const STD_MACROS_DISPLAY: &str = "<std macros>";

/// Returns true if `file_name` names a compiler pseudo file (`<std macros>`,
/// `<anon>`, ...) rather than a file on disk.
pub fn is_pseudo_file(file_name: &str) -> bool {
    file_name.len() >= 2 && file_name.starts_with('<') && file_name.ends_with('>')
}

/// Renders `path`, substituting the compiler-internal sentinel.
pub fn display_path(path: &str) -> &str {
    if path == STD_MACROS_PATH {
        STD_MACROS_DISPLAY
    } else {
        path
    }
}

/// A 1-based, inclusive-start line/column range inside a source file.
///
/// A range always satisfies `(start_line, start_column) <= (end_line, end_column)`.
///
/// # Example
/// ```
/// use cargo_e_msg::e_location::SourceRange;
///
/// let range = SourceRange::new(8, 19, 8, 23);
/// assert_eq!(range.to_string(), "8:19-8:23");
///
/// // Reversed input collapses onto the start.
/// let range = SourceRange::new(3, 5, 2, 1);
/// assert_eq!(range, SourceRange::new(3, 5, 3, 5));
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourceRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl SourceRange {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        let start = (start_line.max(1), start_column.max(1));
        let mut end = (end_line.max(1), end_column.max(1));
        if end < start {
            tracing::warn!(
                "reversed range {}:{}-{}:{}, collapsing onto start",
                start_line,
                start_column,
                end_line,
                end_column
            );
            end = start;
        }
        SourceRange {
            start_line: start.0,
            start_column: start.1,
            end_line: end.0,
            end_column: end.1,
        }
    }

    /// Placeholder range for messages that carry no meaningful location.
    pub fn placeholder() -> Self {
        SourceRange::new(1, 1, 1, 1)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}
