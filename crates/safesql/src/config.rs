use crate::error::{SqlError, SqlResult};
use serde::{Deserialize, Serialize};

/// Configuration for a [`SafeSql`](crate::SafeSql) builder.
///
/// By default the builder is lenient: mismatched values are reported and
/// coerced to a safe default instead of failing the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Abort on type mismatches and argument count mismatches.
    pub strict_types: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    safesql: BuilderConfig,
}

impl BuilderConfig {
    /// Create a new configuration with defaults (lenient).
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict configuration.
    pub fn strict() -> Self {
        Self { strict_types: true }
    }

    /// Lenient configuration.
    pub fn lenient() -> Self {
        Self {
            strict_types: false,
        }
    }

    /// Toggle strict type checking.
    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }

    /// Parse the `[safesql]` table of a TOML document.
    ///
    /// A document without the table yields the defaults.
    ///
    /// ```toml
    /// [safesql]
    /// strict_types = true
    /// ```
    pub fn from_toml_str(raw: &str) -> SqlResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| SqlError::Config(format!("failed to parse config: {e}")))?;
        Ok(file.safesql)
    }
}
