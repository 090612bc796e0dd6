//! Error reporting hooks.
//!
//! The builder hands every problem it detects to an injected [`ErrorReporter`]
//! before deciding (based on [`BuilderConfig`](crate::BuilderConfig)) whether to
//! continue with a safe default or fail the call.

use crate::error::ErrorKind;
use std::sync::{Mutex, PoisonError};
use tracing::Level;

/// Receives problems detected while building SQL.
pub trait ErrorReporter: Send + Sync {
    /// Called once per detected problem. `sql` is the offending template or
    /// statement when one is known.
    fn report(&self, kind: ErrorKind, message: &str, sql: Option<&str>);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn report(&self, _kind: ErrorKind, _message: &str, _sql: Option<&str>) {}
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// A `tracing`-based reporter. This is the default reporter of
/// [`SafeSql`](crate::SafeSql).
///
/// Events are emitted under the `safesql` target.
#[derive(Debug, Clone)]
pub struct TracingReporter {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            max_sql_length: Some(200),
        }
    }
}

impl TracingReporter {
    /// Create a new reporter with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl ErrorReporter for TracingReporter {
    fn report(&self, kind: ErrorKind, message: &str, sql: Option<&str>) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let kind = kind.as_str();
        match sql.map(|s| self.truncate_sql(s)) {
            Some(sql) => emit_at_level!(
                self.level,
                target: "safesql",
                kind,
                sql = %sql,
                "{message}"
            ),
            None => emit_at_level!(self.level, target: "safesql", kind, "{message}"),
        }
    }
}

/// One captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub kind: ErrorKind,
    pub message: String,
    pub sql: Option<String>,
}

/// Reporter that keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    reports: Mutex<Vec<Report>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports captured so far.
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Kinds of the reports captured so far, in order.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.reports().into_iter().map(|r| r.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn clear(&self) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, kind: ErrorKind, message: &str, sql: Option<&str>) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Report {
                kind,
                message: message.to_string(),
                sql: sql.map(str::to_string),
            });
    }
}
