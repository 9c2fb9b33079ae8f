//! Per-subcase diagnostic sink.
//!
//! Recoverable conditions are both logged through the `log` facade and kept
//! on the subcase result, so callers without a logger still see them.

use serde::Serialize;

/// Severity of a recoverable condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Info,
    Warning,
}

/// One recorded condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Collects diagnostics for one subcase
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    subcase_id: i32,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(subcase_id: i32) -> Self {
        Self {
            subcase_id,
            entries: Vec::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("subcase {}: {}", self.subcase_id, message);
        self.entries.push(Diagnostic {
            severity: Severity::Info,
            message,
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("subcase {}: {}", self.subcase_id, message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
