//! Executor handles and running rendered queries through them.
//!
//! A [`Query`] only stores its executor. The methods here render the query and
//! hand the SQL and arguments to the stored handle.

use crate::error::{BoilError, BoilResult};
use crate::query::Query;
use crate::render::BuiltQuery;
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Something that can run a parameterized statement: a client, a transaction,
/// or a reference to either.
pub trait Executor: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<Vec<Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<u64>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Returns [`BoilError::NotFound`] if no rows are returned; extra rows are
    /// ignored.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| BoilError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<Option<Row>>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            Ok(rows.into_iter().next())
        }
    }
}

impl Executor for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BoilResult<Vec<Row>> {
        Ok(tokio_postgres::Client::query(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BoilResult<u64> {
        Ok(tokio_postgres::Client::execute(self, sql, params).await?)
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BoilResult<Vec<Row>> {
        Ok(tokio_postgres::Transaction::query(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BoilResult<u64> {
        Ok(tokio_postgres::Transaction::execute(self, sql, params).await?)
    }
}

impl<T: Executor> Executor for &T {
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<Vec<Row>>> + Send {
        (**self).query(sql, params)
    }

    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<u64>> + Send {
        (**self).execute(sql, params)
    }
}

impl<T: Executor> Executor for Arc<T> {
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<Vec<Row>>> + Send {
        (**self).query(sql, params)
    }

    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BoilResult<u64>> + Send {
        (**self).execute(sql, params)
    }
}

impl<E: Executor> Query<E> {
    fn prepare(&self, op: &'static str) -> BoilResult<(&E, BuiltQuery)> {
        let executor = self.executor.as_ref().ok_or(BoilError::MissingExecutor)?;
        let built = self.render()?;
        #[cfg(feature = "tracing")]
        crate::trace::executing(op, &built);
        #[cfg(not(feature = "tracing"))]
        let _ = op;
        Ok((executor, built))
    }

    /// Render and execute, returning the number of affected rows.
    pub async fn exec(&self) -> BoilResult<u64> {
        let (executor, built) = self.prepare("exec")?;
        executor.execute(&built.sql, &built.params_ref()).await
    }

    /// Render and return every row.
    pub async fn query_all(&self) -> BoilResult<Vec<Row>> {
        let (executor, built) = self.prepare("query_all")?;
        executor.query(&built.sql, &built.params_ref()).await
    }

    /// Render and return the first row; no rows is [`BoilError::NotFound`].
    pub async fn query_one(&self) -> BoilResult<Row> {
        let (executor, built) = self.prepare("query_one")?;
        executor.query_one(&built.sql, &built.params_ref()).await
    }

    /// Render and return the first row, if any.
    pub async fn query_opt(&self) -> BoilResult<Option<Row>> {
        let (executor, built) = self.prepare("query_opt")?;
        executor.query_opt(&built.sql, &built.params_ref()).await
    }
}
