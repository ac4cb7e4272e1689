use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The run will most likely produce nothing useful.
    Critical,
    /// Part of the report was skipped; the output is probably incomplete.
    Important,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Important => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Accumulating log of everything worth telling the operator about a run.
///
/// Recoverable anomalies end up here instead of aborting the conversion.
/// Each entry is also emitted as a `tracing` debug event; the rendered log
/// is the operator's copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message.into());
    }

    pub fn important(&mut self, message: impl Into<String>) {
        self.push(Severity::Important, message.into());
    }

    pub fn critical(&mut self, message: impl Into<String>) {
        self.push(Severity::Critical, message.into());
    }

    fn push(&mut self, severity: Severity, message: String) {
        tracing::debug!(%severity, "{message}");
        self.entries.push(Diagnostic { severity, message });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any entry contains `needle`. Mostly useful in tests.
    pub fn mentions(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }

    /// The log as plain text, one entry per line, in the order written.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry.severity {
                Severity::Info => out.push_str(&entry.message),
                _ => out.push_str(&format!("{}: {}", entry.severity, entry.message)),
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
