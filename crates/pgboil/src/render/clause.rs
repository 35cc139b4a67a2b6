//! Per-clause text assembly.
//!
//! Each renderer turns one part of a [`Query`] into a [`Clause`]: a list of
//! pieces that either come from the renderer itself (keywords, separators,
//! generated bind slots) or from the caller (fragments with local
//! placeholders). Nothing is numbered here; that happens when the clause is
//! written into a [`Collector`].

use super::placeholder::Collector;
use crate::error::{BoilError, BoilResult};
use crate::param::Param;
use crate::query::{Fragment, JoinKind, Query, Statement};
use std::borrow::Cow;

#[derive(Debug)]
pub(crate) enum Piece<'a> {
    /// Renderer-owned SQL, copied as is.
    Sql(Cow<'a, str>),
    /// Caller-authored SQL with placeholders numbered from `$1`.
    Fragment {
        clause: &'static str,
        sql: &'a str,
        args: &'a [Param],
    },
    /// A generated placeholder for a single value.
    Bind(&'a Param),
}

#[derive(Debug)]
pub(crate) struct Clause<'a> {
    pieces: Vec<Piece<'a>>,
}

impl<'a> Clause<'a> {
    fn new(keyword: &'static str) -> Self {
        Self {
            pieces: vec![Piece::Sql(Cow::Borrowed(keyword))],
        }
    }

    fn sql(&mut self, sql: impl Into<Cow<'a, str>>) -> &mut Self {
        self.pieces.push(Piece::Sql(sql.into()));
        self
    }

    fn fragment(&mut self, clause: &'static str, sql: &'a str, args: &'a [Param]) -> &mut Self {
        self.pieces.push(Piece::Fragment { clause, sql, args });
        self
    }

    fn bind(&mut self, param: &'a Param) -> &mut Self {
        self.pieces.push(Piece::Bind(param));
        self
    }

    /// Append text-only fragments separated by `sep`.
    fn list(&mut self, clause: &'static str, items: &'a [String], sep: &'static str) -> &mut Self {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql(sep);
            }
            self.fragment(clause, item, &[]);
        }
        self
    }

    /// Append fragments with their args separated by `sep`.
    fn fragments(&mut self, clause: &'static str, items: &'a [Fragment], sep: &'static str) -> &mut Self {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql(sep);
            }
            self.fragment(clause, &item.sql, &item.args);
        }
        self
    }

    pub(crate) fn write_to(&self, out: &mut Collector) -> BoilResult<()> {
        for piece in &self.pieces {
            match piece {
                Piece::Sql(sql) => out.push_sql(sql),
                Piece::Fragment { clause, sql, args } => out.push_fragment(clause, sql, args)?,
                Piece::Bind(param) => out.push_bind(param),
            }
        }
        Ok(())
    }
}

/// `SELECT ... FROM`, `UPDATE ... SET` or `DELETE FROM`.
pub(crate) fn head<E>(q: &Query<E>) -> BoilResult<Clause<'_>> {
    if q.from.trim().is_empty() {
        return Err(BoilError::MissingFromClause);
    }

    let clause = match &q.statement {
        Statement::Select => {
            let mut c = Clause::new("SELECT ");
            if q.select_cols.is_empty() {
                c.sql("*");
            } else {
                c.list("SELECT", &q.select_cols, ", ");
            }
            c.sql(" FROM ").fragment("FROM", &q.from, &[]);
            c
        }
        Statement::Update(assignments) => {
            if assignments.is_empty() {
                return Err(BoilError::EmptyUpdate);
            }
            let mut c = Clause::new("UPDATE ");
            c.fragment("UPDATE", &q.from, &[]).sql(" SET ");
            for (i, (column, value)) in assignments.iter().enumerate() {
                if i > 0 {
                    c.sql(", ");
                }
                c.sql(column.as_str()).sql(" = ").bind(value);
            }
            c
        }
        Statement::Delete => {
            let mut c = Clause::new("DELETE FROM ");
            c.fragment("FROM", &q.from, &[]);
            c
        }
    };
    Ok(clause)
}

/// `<KIND> JOIN ON <cond>` for every join, grouped by kind in [`JoinKind::ALL`] order.
pub(crate) fn joins<E>(q: &Query<E>) -> Vec<Clause<'_>> {
    JoinKind::ALL
        .iter()
        .flat_map(|&kind| {
            q.joins(kind).iter().map(move |join| {
                let mut c = Clause::new(kind.keyword());
                c.sql(" ON ").fragment(kind.keyword(), &join.sql, &join.args);
                c
            })
        })
        .collect()
}

/// `WHERE a AND b OR c`; each entry's flag picks the connective before it.
pub(crate) fn where_clause<E>(q: &Query<E>) -> Option<Clause<'_>> {
    if q.where_clauses.is_empty() {
        return None;
    }

    let mut c = Clause::new("WHERE ");
    for (i, w) in q.where_clauses.iter().enumerate() {
        if i > 0 {
            c.sql(if w.or_separator { " OR " } else { " AND " });
        }
        c.fragment("WHERE", &w.fragment.sql, &w.fragment.args);
    }
    Some(c)
}

pub(crate) fn group_by<E>(q: &Query<E>) -> Option<Clause<'_>> {
    if q.group_by.is_empty() {
        return None;
    }
    let mut c = Clause::new("GROUP BY ");
    c.list("GROUP BY", &q.group_by, ", ");
    Some(c)
}

pub(crate) fn having<E>(q: &Query<E>) -> Option<Clause<'_>> {
    if q.having.is_empty() {
        return None;
    }
    let mut c = Clause::new("HAVING ");
    c.fragments("HAVING", &q.having, " AND ");
    Some(c)
}

pub(crate) fn order_by<E>(q: &Query<E>) -> Option<Clause<'_>> {
    if q.order_by.is_empty() {
        return None;
    }
    let mut c = Clause::new("ORDER BY ");
    c.list("ORDER BY", &q.order_by, ", ");
    Some(c)
}

/// `LIMIT n` / `OFFSET n` as literals; zero omits the clause.
fn literal<'a>(keyword: &'static str, value: i64) -> BoilResult<Option<Clause<'a>>> {
    match value {
        0 => Ok(None),
        n if n < 0 => Err(BoilError::InvalidClauseValue {
            clause: keyword,
            value: n,
        }),
        n => {
            let mut c = Clause::new(keyword);
            c.sql(format!(" {n}"));
            Ok(Some(c))
        }
    }
}

pub(crate) fn limit<E>(q: &Query<E>) -> BoilResult<Option<Clause<'_>>> {
    literal("LIMIT", q.limit)
}

pub(crate) fn offset<E>(q: &Query<E>) -> BoilResult<Option<Clause<'_>>> {
    literal("OFFSET", q.offset)
}
