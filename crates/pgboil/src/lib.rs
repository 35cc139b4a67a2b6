//! # pgboil
//!
//! A structured SQL statement model for PostgreSQL.
//!
//! A [`Query`] is built incrementally through free mutator functions, each of
//! which stores one clause verbatim. Every clause numbers its own
//! placeholders from `$1`; [`Query::render`] assembles the clauses in a fixed
//! order and renumbers them into one statement-wide `$1..$n` sequence, with
//! the arguments collected in the same order.
//!
//! ```ignore
//! use pgboil::{params, Query, set_from, set_inner_join, set_where, set_limit};
//!
//! let mut q = Query::new();
//! set_from(&mut q, "t");
//! set_where(&mut q, "x > $1 AND y > $2", params![5_i32, 3_i32]);
//! set_inner_join(&mut q, "j.id = $1", params![9_i32]);
//! set_limit(&mut q, 10);
//!
//! let built = q.render()?;
//! assert_eq!(
//!     built.sql,
//!     "SELECT * FROM t INNER JOIN ON j.id = $1 WHERE x > $2 AND y > $3 LIMIT 10"
//! );
//! // built.params: [9, 5, 3]
//! ```
//!
//! [`set_sql`] switches a query to raw mode: its text and arguments are
//! returned as given and nothing else is rendered.
//!
//! A query can carry an executor handle ([`set_executor`]); with the
//! [`Executor`] trait in scope it can be run directly via [`Query::exec`],
//! [`Query::query_all`], [`Query::query_one`] and [`Query::query_opt`].

pub mod config;
pub mod error;
pub mod executor;
pub mod mutate;
pub mod param;
pub mod query;
pub mod render;

#[cfg(feature = "tracing")]
mod trace;

pub use config::{POSTGRES_MAX_PARAMS, RenderConfig};
pub use error::{BoilError, BoilResult};
pub use executor::Executor;
pub use mutate::{
    set_delete, set_executor, set_from, set_group_by, set_having, set_inner_join, set_join,
    set_last_where_as_or, set_left_outer_join, set_limit, set_offset, set_order_by,
    set_outer_join, set_right_outer_join, set_select, set_sql, set_statement, set_update,
    set_where,
};
pub use param::{Param, ParamList};
pub use query::{Fragment, JoinKind, Query, Statement, WhereClause};
pub use render::{BuiltQuery, build_query};
