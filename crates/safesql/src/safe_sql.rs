//! The builder handle that ties the collaborators together.

use crate::config::BuilderConfig;
use crate::error::{ErrorKind, SqlError, SqlResult};
use crate::escape::{Escaper, MysqlEscaper};
use crate::report::{ErrorReporter, TracingReporter};
use std::fmt;
use std::sync::Arc;

/// Template substitution and statement assembly over an injected escaper and
/// error reporter.
///
/// `SafeSql` holds no per-call state: one instance can be cloned or shared
/// across threads and every method is a pure function of its arguments and
/// the configured collaborators.
///
/// # Example
///
/// ```ignore
/// use safesql::{SafeSql, args};
///
/// let db = SafeSql::new();
/// let sql = db.substitute("SELECT * FROM ?n WHERE id = ?i", &args!["users", 5])?;
/// assert_eq!(sql, "SELECT * FROM `users` WHERE id = 5");
/// ```
#[derive(Clone)]
pub struct SafeSql {
    escaper: Arc<dyn Escaper>,
    reporter: Arc<dyn ErrorReporter>,
    config: BuilderConfig,
}

impl Default for SafeSql {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SafeSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeSql")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SafeSql {
    /// Lenient builder with [`MysqlEscaper`] and [`TracingReporter`].
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Builder with [`MysqlEscaper`], [`TracingReporter`] and `config`.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            escaper: Arc::new(MysqlEscaper),
            reporter: Arc::new(TracingReporter::default()),
            config,
        }
    }

    /// Strict builder with the default collaborators.
    pub fn strict() -> Self {
        Self::with_config(BuilderConfig::strict())
    }

    /// Replace the escaper.
    pub fn escaper(self, escaper: impl Escaper + 'static) -> Self {
        self.escaper_arc(Arc::new(escaper))
    }

    /// Replace the escaper with a shared one.
    pub fn escaper_arc(mut self, escaper: Arc<dyn Escaper>) -> Self {
        self.escaper = escaper;
        self
    }

    /// Replace the error reporter.
    pub fn reporter(self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter_arc(Arc::new(reporter))
    }

    /// Replace the error reporter with a shared one (e.g. to inspect a
    /// [`CollectingReporter`](crate::CollectingReporter) afterwards).
    pub fn reporter_arc(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the configuration.
    pub fn config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn builder_config(&self) -> BuilderConfig {
        self.config
    }

    pub fn is_strict(&self) -> bool {
        self.config.strict_types
    }

    pub(crate) fn escaper_ref(&self) -> &dyn Escaper {
        self.escaper.as_ref()
    }

    /// Forward `err` to the reporter if it has a reportable kind.
    pub(crate) fn report(&self, err: &SqlError, sql: Option<&str>) {
        if let Some(kind) = err.kind() {
            self.reporter.report(kind, &err.to_string(), sql);
        }
    }

    /// Forward an executor failure, whatever its variant, as a connection
    /// error against the statement that caused it.
    pub(crate) fn report_executor(&self, err: &SqlError, sql: &str) {
        self.reporter
            .report(ErrorKind::ConnectionError, &err.to_string(), Some(sql));
    }

    /// Report `err`, then either fail or continue with `fallback`.
    ///
    /// Connection errors always fail. Everything else fails only in strict
    /// mode.
    pub(crate) fn recover(
        &self,
        err: SqlError,
        sql: Option<&str>,
        fallback: impl FnOnce() -> SqlResult<String>,
    ) -> SqlResult<String> {
        self.report(&err, sql);
        if self.is_strict() || err.is_connection() {
            return Err(err);
        }
        fallback()
    }

    /// Escape through the driver, reporting driver failures.
    pub(crate) fn escape(&self, raw: &str) -> SqlResult<String> {
        self.escaper
            .escape_string(raw)
            .inspect_err(|err| self.report(err, None))
    }

    /// `raw` as an escaped single-quoted literal.
    pub(crate) fn quote(&self, raw: &str) -> SqlResult<String> {
        let escaped = self.escape(raw)?;
        let mut out = String::with_capacity(escaped.len() + 2);
        out.push('\'');
        out.push_str(&escaped);
        out.push('\'');
        Ok(out)
    }
}
