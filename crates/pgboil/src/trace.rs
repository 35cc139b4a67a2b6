//! `tracing` events for rendered and executed SQL.

use crate::config::RenderConfig;
use crate::render::BuiltQuery;
use tracing::Level;

pub(crate) const TARGET: &str = "pgboil.sql";

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn display_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

pub(crate) fn rendered(config: &RenderConfig, statement: &str, raw: bool, built: &BuiltQuery) {
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

    let sql = display_sql(&built.sql, config.max_sql_length);
    emit_at_level!(
        config.level,
        target: TARGET,
        statement,
        raw,
        param_count = built.params.len(),
        sql = %sql,
        "rendered query"
    );
}

pub(crate) fn executing(op: &'static str, built: &BuiltQuery) {
    tracing::debug!(
        target: TARGET,
        op,
        param_count = built.params.len(),
        sql = %display_sql(&built.sql, Some(200)),
        "executing query"
    );
}
