use serde::Serialize;
use std::fmt;

/// Severity of a display message.
///
/// rustc's `note` (and `failure-note`) level maps to [`Severity::Info`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Help,
}

impl Severity {
    /// Maps a rustc `level` string onto a severity.
    ///
    /// Unknown levels never fail: they map to the closest known severity.
    ///
    /// ```
    /// use cargo_e_msg::e_severity::Severity;
    ///
    /// assert_eq!(Severity::from_level("error"), Severity::Error);
    /// assert_eq!(Severity::from_level("error: internal compiler error"), Severity::Error);
    /// assert_eq!(Severity::from_level("note"), Severity::Info);
    /// assert_eq!(Severity::from_level("something-new"), Severity::Info);
    /// ```
    pub fn from_level(level: &str) -> Self {
        match level {
            "error" | "error: internal compiler error" => Severity::Error,
            "warning" => Severity::Warning,
            "note" | "failure-note" => Severity::Info,
            "help" => Severity::Help,
            other => {
                let lower = other.to_ascii_lowercase();
                let closest = if lower.contains("error") {
                    Severity::Error
                } else if lower.contains("warn") {
                    Severity::Warning
                } else if lower.contains("help") {
                    Severity::Help
                } else {
                    Severity::Info
                };
                tracing::warn!("unknown diagnostic level {:?}, using {}", other, closest);
                closest
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Help => "help",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tally of display messages per severity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub helps: usize,
}

impl SeverityCounts {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.infos += 1,
            Severity::Help => self.helps += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos + self.helps
    }
}

impl fmt::Display for SeverityCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} errors, {} warnings, {} infos, {} helps",
            self.errors, self.warnings, self.infos, self.helps
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(Severity::from_level("warning"), Severity::Warning);
        assert_eq!(Severity::from_level("help"), Severity::Help);
        assert_eq!(Severity::from_level("failure-note"), Severity::Info);
    }

    #[test]
    fn test_schema_drift_maps_to_closest() {
        assert_eq!(Severity::from_level("fatal error"), Severity::Error);
        assert_eq!(Severity::from_level("Warning"), Severity::Warning);
        assert_eq!(Severity::from_level("help-ish"), Severity::Help);
        assert_eq!(Severity::from_level(""), Severity::Info);
    }

    #[test]
    fn test_counts() {
        let mut counts = SeverityCounts::default();
        counts.add(Severity::Error);
        counts.add(Severity::Info);
        counts.add(Severity::Info);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.to_string(), "1 errors, 0 warnings, 2 infos, 0 helps");
    }
}
