//! Mutators for [`Query`].
//!
//! Each function owns exactly one field of the query, stores its input
//! verbatim and never fails. Placeholders inside every piece of text are
//! numbered from `$1` locally; rendering renumbers them statement-wide.
//!
//! ```ignore
//! use pgboil::{params, set_from, set_inner_join, set_where};
//!
//! let mut q = pgboil::Query::new();
//! set_from(&mut q, "users u");
//! set_inner_join(&mut q, "o.user_id = u.id AND o.total > $1", params![100_i64]);
//! set_where(&mut q, "u.status = $1", params!["active"]);
//! // SELECT * FROM users u INNER JOIN ON o.user_id = u.id AND o.total > $1 WHERE u.status = $2
//! ```

use crate::param::Param;
use crate::query::{Fragment, JoinKind, Query, Statement, WhereClause};
use std::collections::BTreeMap;

/// Replace the FROM expression (table name, join list or subquery).
pub fn set_from<E>(q: &mut Query<E>, from: impl Into<String>) {
    q.from = from.into();
}

/// Replace the selected columns. An empty list renders as `*`.
pub fn set_select<E, I, S>(q: &mut Query<E>, cols: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    q.select_cols = cols.into_iter().map(Into::into).collect();
}

/// Switch the statement kind explicitly.
pub fn set_statement<E>(q: &mut Query<E>, statement: Statement) {
    q.statement = statement;
}

/// Turn the query into an UPDATE with the given assignments.
///
/// Replaces any previous statement kind, including an earlier DELETE.
pub fn set_update<E, K>(q: &mut Query<E>, assignments: impl IntoIterator<Item = (K, Param)>)
where
    K: Into<String>,
{
    let assignments: BTreeMap<String, Param> = assignments
        .into_iter()
        .map(|(col, value)| (col.into(), value))
        .collect();
    q.statement = Statement::Update(assignments);
}

/// Turn the query into a DELETE.
///
/// Replaces any previous statement kind; UPDATE assignments are discarded.
pub fn set_delete<E>(q: &mut Query<E>) {
    q.statement = Statement::Delete;
}

/// Append a WHERE condition, joined with AND by default.
pub fn set_where<E>(q: &mut Query<E>, clause: impl Into<String>, args: Vec<Param>) {
    q.where_clauses.push(WhereClause {
        fragment: Fragment::new(clause, args),
        or_separator: false,
    });
}

/// Join the most recently added WHERE condition with OR instead of AND.
///
/// No-op when there are no WHERE conditions.
pub fn set_last_where_as_or<E>(q: &mut Query<E>) {
    if let Some(last) = q.where_clauses.last_mut() {
        last.or_separator = true;
    }
}

/// Append a GROUP BY expression.
pub fn set_group_by<E>(q: &mut Query<E>, clause: impl Into<String>) {
    q.group_by.push(clause.into());
}

/// Append an ORDER BY expression.
pub fn set_order_by<E>(q: &mut Query<E>, clause: impl Into<String>) {
    q.order_by.push(clause.into());
}

/// Append a HAVING condition. Conditions are joined with AND.
pub fn set_having<E>(q: &mut Query<E>, clause: impl Into<String>, args: Vec<Param>) {
    q.having.push(Fragment::new(clause, args));
}

/// Set LIMIT; `0` removes it.
pub fn set_limit<E>(q: &mut Query<E>, limit: i64) {
    q.limit = limit;
}

/// Set OFFSET; `0` removes it.
pub fn set_offset<E>(q: &mut Query<E>, offset: i64) {
    q.offset = offset;
}

/// Append a join of the given kind.
///
/// `on` is the join condition only; it renders as `<KIND> JOIN ON <on>`.
pub fn set_join<E>(q: &mut Query<E>, kind: JoinKind, on: impl Into<String>, args: Vec<Param>) {
    q.joins[kind.index()].push(Fragment::new(on, args));
}

pub fn set_inner_join<E>(q: &mut Query<E>, on: impl Into<String>, args: Vec<Param>) {
    set_join(q, JoinKind::Inner, on, args);
}

pub fn set_outer_join<E>(q: &mut Query<E>, on: impl Into<String>, args: Vec<Param>) {
    set_join(q, JoinKind::Outer, on, args);
}

pub fn set_left_outer_join<E>(q: &mut Query<E>, on: impl Into<String>, args: Vec<Param>) {
    set_join(q, JoinKind::LeftOuter, on, args);
}

pub fn set_right_outer_join<E>(q: &mut Query<E>, on: impl Into<String>, args: Vec<Param>) {
    set_join(q, JoinKind::RightOuter, on, args);
}

/// Override the whole statement with hand-written SQL.
///
/// While set, rendering returns exactly `sql` and `args`; every other field
/// is ignored and nothing is renumbered.
pub fn set_sql<E>(q: &mut Query<E>, sql: impl Into<String>, args: Vec<Param>) {
    q.raw = Some(Fragment::new(sql, args));
}

/// Replace the executor handle.
pub fn set_executor<E>(q: &mut Query<E>, executor: E) {
    q.executor = Some(executor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn set_from_replaces() {
        let mut q = Query::new();
        set_from(&mut q, "users");
        set_from(&mut q, "videos a, orders b");
        assert_eq!(q.from(), "videos a, orders b");
    }

    #[test]
    fn set_select_replaces_columns() {
        let mut q = Query::new();
        set_select(&mut q, ["a"]);
        set_select(&mut q, ["col1", "col2"]);
        assert_eq!(q.select_cols(), ["col1", "col2"]);
    }

    #[test]
    fn set_where_appends_with_args() {
        let mut q = Query::new();
        set_where(&mut q, "x > $1 AND y > $2", params![5_i32, 3_i32]);

        assert_eq!(q.where_clauses().len(), 1);
        let w = &q.where_clauses()[0];
        assert_eq!(w.clause(), "x > $1 AND y > $2");
        assert_eq!(format!("{:?}", w.args()), "[5, 3]");
        assert!(!w.or_separator());
    }

    #[test]
    fn set_last_where_as_or_marks_only_latest() {
        let mut q = Query::new();
        set_where(&mut q, "a", params![]);
        set_where(&mut q, "b", params![]);
        set_last_where_as_or(&mut q);

        assert!(!q.where_clauses()[0].or_separator());
        assert!(q.where_clauses()[1].or_separator());
    }

    #[test]
    fn set_last_where_as_or_without_where_is_noop() {
        let mut q = Query::new();
        set_last_where_as_or(&mut q);
        assert!(q.where_clauses().is_empty());
    }

    #[test]
    fn fragments_append_in_order() {
        let mut q = Query::new();
        set_group_by(&mut q, "col1, col2");
        set_group_by(&mut q, "col3");
        set_order_by(&mut q, "col1 desc, col2 asc");
        set_having(&mut q, "count(orders.order_id) > 10", params![]);

        assert_eq!(q.group_by(), ["col1, col2", "col3"]);
        assert_eq!(q.order_by(), ["col1 desc, col2 asc"]);
        assert_eq!(q.having()[0].sql(), "count(orders.order_id) > 10");
    }

    #[test]
    fn limit_and_offset_store_verbatim() {
        let mut q = Query::new();
        set_limit(&mut q, 10);
        set_offset(&mut q, -3);
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), -3);
    }

    #[test]
    fn joins_land_in_their_own_kind() {
        let mut q = Query::new();
        set_inner_join(&mut q, "thing=$1 AND stuff=$2", params![2_i32, 5_i32]);
        set_outer_join(&mut q, "o", params![]);
        set_left_outer_join(&mut q, "l", params![]);
        set_right_outer_join(&mut q, "r", params![]);

        let inner = q.joins(JoinKind::Inner);
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].sql(), "thing=$1 AND stuff=$2");
        assert_eq!(format!("{:?}", inner[0].args()), "[2, 5]");
        assert_eq!(q.joins(JoinKind::Outer)[0].sql(), "o");
        assert_eq!(q.joins(JoinKind::LeftOuter)[0].sql(), "l");
        assert_eq!(q.joins(JoinKind::RightOuter)[0].sql(), "r");
    }

    #[test]
    fn set_sql_stores_raw_statement() {
        let mut q = Query::new();
        set_sql(&mut q, "select * from thing", params![5_i32, 3_i32]);

        let raw = q.raw().expect("raw set");
        assert_eq!(raw.sql(), "select * from thing");
        assert_eq!(raw.args().len(), 2);
    }

    #[test]
    fn set_update_sorts_and_marks_update() {
        let mut q = Query::new();
        set_update(
            &mut q,
            [("col2", Param::new(2_i32)), ("col1", Param::new(1_i32))],
        );

        let Statement::Update(assignments) = q.statement() else {
            panic!("expected update, got {:?}", q.statement());
        };
        let cols: Vec<&str> = assignments.keys().map(String::as_str).collect();
        assert_eq!(cols, ["col1", "col2"]);
    }

    #[test]
    fn last_statement_kind_wins() {
        let mut q = Query::new();
        set_update(&mut q, [("a", Param::new(1_i32))]);
        set_delete(&mut q);
        assert!(q.statement().is_delete());

        set_statement(&mut q, Statement::Select);
        assert!(q.statement().is_select());
    }

    #[test]
    fn set_executor_replaces_handle() {
        let mut q = Query::with_executor("first");
        set_executor(&mut q, "second");
        assert_eq!(q.executor(), Some(&"second"));
        assert_eq!(q.take_executor(), Some("second"));
        assert!(q.executor().is_none());
    }
}
