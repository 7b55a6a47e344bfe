//! Non-fatal diagnostics raised while regrouping a batch.
//!
//! The graph builder and group assigner report through a [`DiagnosticSink`]
//! passed in by the caller rather than a global logger. The binary uses
//! [`LogSink`]; tests collect into a `Vec<Diagnostic>`.

use std::fmt;

use log::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A value shaped like an assignment breakout; its references were not extracted.
    SuspectedInjection { name: String, value: String },
    /// A record's sort group was reassigned.
    GroupChanged {
        name: String,
        from: Option<u32>,
        to: u32,
    },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::SuspectedInjection { .. } => Level::Warn,
            Diagnostic::GroupChanged { .. } => Level::Info,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SuspectedInjection { name, value } => {
                write!(f, "found shell injection: {name}={value}")
            }
            Diagnostic::GroupChanged { name, from, to } => {
                let from = from.map_or_else(|| "unset".to_string(), |g| g.to_string());
                write!(f, "sort_group changed from {from} to {to} for {name}")
            }
        }
    }
}

pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade at their own level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        log::log!(diagnostic.level(), "{diagnostic}");
    }
}
