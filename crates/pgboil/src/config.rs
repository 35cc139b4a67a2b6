//! Render configuration.

/// Maximum number of bind parameters a single PostgreSQL statement accepts.
pub const POSTGRES_MAX_PARAMS: usize = 65535;

/// Configuration for [`Query::render_with`](crate::Query::render_with).
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Upper bound on the statement-wide argument count. `None` disables the check.
    pub max_params: Option<usize>,
    /// Tracing event level for the render event.
    #[cfg(feature = "tracing")]
    pub level: tracing::Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    #[cfg(feature = "tracing")]
    pub max_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_params: Some(POSTGRES_MAX_PARAMS),
            #[cfg(feature = "tracing")]
            level: tracing::Level::DEBUG,
            #[cfg(feature = "tracing")]
            max_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of bind parameters.
    pub fn max_params(mut self, max: usize) -> Self {
        self.max_params = Some(max);
        self
    }

    /// Disable the bind parameter ceiling.
    pub fn unlimited_params(mut self) -> Self {
        self.max_params = None;
        self
    }

    /// Override the tracing event level.
    #[cfg(feature = "tracing")]
    pub fn level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to log.
    #[cfg(feature = "tracing")]
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Log SQL without truncation.
    #[cfg(feature = "tracing")]
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
