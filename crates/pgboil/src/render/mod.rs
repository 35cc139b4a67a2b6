//! Rendering a [`Query`] into SQL text plus its bind arguments.
//!
//! Clauses are emitted in a fixed order regardless of the order mutators were
//! called in:
//!
//! 1. `SELECT ... FROM` / `UPDATE ... SET` / `DELETE FROM`
//! 2. joins: inner, full outer, left outer, right outer
//! 3. `WHERE`
//! 4. `GROUP BY`
//! 5. `HAVING`
//! 6. `ORDER BY`
//! 7. `LIMIT`, then `OFFSET`
//!
//! Placeholders are renumbered on the way out so the text uses one
//! contiguous `$1..$n` sequence and `params[i]` belongs to `$(i + 1)`.

mod clause;
mod placeholder;


use crate::config::RenderConfig;
use crate::error::{BoilError, BoilResult};
use crate::param::{Param, ParamList};
use crate::query::Query;
use placeholder::Collector;
use tokio_postgres::types::ToSql;

/// The result of rendering a query.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: ParamList,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: ParamList) -> Self {
        Self { sql, params }
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }

    /// Split into the SQL text and the argument list.
    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.params.into_vec())
    }
}

impl<E> Query<E> {
    /// Render with the default [`RenderConfig`].
    pub fn render(&self) -> BoilResult<BuiltQuery> {
        self.render_with(&RenderConfig::default())
    }

    /// Render the statement.
    ///
    /// With a raw override set, its text and arguments are returned verbatim.
    /// Rendering never mutates the query and is repeatable.
    pub fn render_with(&self, config: &RenderConfig) -> BoilResult<BuiltQuery> {
        let built = match &self.raw {
            Some(raw) => BuiltQuery::new(raw.sql.clone(), ParamList::from(raw.args.clone())),
            None => self.build_clauses(config)?,
        };

        #[cfg(feature = "tracing")]
        crate::trace::rendered(config, self.statement_label(), self.raw.is_some(), &built);

        Ok(built)
    }

    /// Render and return only the SQL text.
    pub fn to_sql(&self) -> BoilResult<String> {
        Ok(self.render()?.sql)
    }

    #[cfg(feature = "tracing")]
    fn statement_label(&self) -> &'static str {
        if self.raw.is_some() {
            "RAW"
        } else {
            self.statement.keyword()
        }
    }

    fn build_clauses(&self, config: &RenderConfig) -> BoilResult<BuiltQuery> {
        let mut clauses = vec![clause::head(self)?];
        clauses.extend(clause::joins(self));
        clauses.extend(clause::where_clause(self));
        clauses.extend(clause::group_by(self));
        clauses.extend(clause::having(self));
        clauses.extend(clause::order_by(self));
        clauses.extend(clause::limit(self)?);
        clauses.extend(clause::offset(self)?);

        let mut out = Collector::new();
        for (i, c) in clauses.iter().enumerate() {
            if i > 0 {
                out.push_sql(" ");
            }
            c.write_to(&mut out)?;
        }

        if let Some(max) = config.max_params {
            let count = out.param_count();
            if count > max {
                return Err(BoilError::TooManyParams { count, max });
            }
        }

        let (sql, params) = out.finish();
        Ok(BuiltQuery::new(sql, params))
    }
}

/// Render `q` with the default configuration.
pub fn build_query<E>(q: &Query<E>) -> BoilResult<BuiltQuery> {
    q.render()
}
