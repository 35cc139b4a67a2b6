//! The statement under construction.
//!
//! A [`Query`] is plain storage: mutators in [`crate::mutate`] write to it and
//! the renderer reads it. Nothing is validated until render time.

use crate::param::Param;
use std::collections::BTreeMap;
use std::fmt;

/// Which statement a non-raw query renders as.
///
/// Exactly one kind is active at a time. Switching away from `Update` drops
/// its assignments.
#[derive(Clone, Debug, Default)]
pub enum Statement {
    /// `SELECT <cols> FROM <from>`
    #[default]
    Select,
    /// `UPDATE <from> SET <col> = <value>, ...`, rendered in column order
    Update(BTreeMap<String, Param>),
    /// `DELETE FROM <from>`
    Delete,
}

impl Statement {
    /// SQL keyword for logging and diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Select => "SELECT",
            Statement::Update(_) => "UPDATE",
            Statement::Delete => "DELETE",
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select)
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Statement::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Statement::Delete)
    }
}

/// Join flavors, in the order they are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Outer,
    LeftOuter,
    RightOuter,
}

impl JoinKind {
    /// All kinds in render order.
    pub const ALL: [JoinKind; 4] = [
        JoinKind::Inner,
        JoinKind::Outer,
        JoinKind::LeftOuter,
        JoinKind::RightOuter,
    ];

    /// The join keyword; rendered as `<keyword> ON <condition>`.
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Outer => "FULL OUTER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            JoinKind::Inner => 0,
            JoinKind::Outer => 1,
            JoinKind::LeftOuter => 2,
            JoinKind::RightOuter => 3,
        }
    }
}

/// A piece of caller-authored SQL with its own `$1..$n` numbering.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub(crate) sql: String,
    pub(crate) args: Vec<Param>,
}

impl Fragment {
    pub(crate) fn new(sql: impl Into<String>, args: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Param] {
        &self.args
    }
}

/// One WHERE entry.
#[derive(Clone, Debug)]
pub struct WhereClause {
    pub(crate) fragment: Fragment,
    /// Joined to the previous entry with OR instead of AND.
    pub(crate) or_separator: bool,
}

impl WhereClause {
    pub fn clause(&self) -> &str {
        self.fragment.sql()
    }

    pub fn args(&self) -> &[Param] {
        self.fragment.args()
    }

    /// Whether this entry is preceded by `OR` when rendered.
    pub fn or_separator(&self) -> bool {
        self.or_separator
    }
}

/// A SELECT/UPDATE/DELETE statement being assembled.
///
/// `E` is the executor handle type. The query stores it but never looks at
/// it while rendering; see [`crate::Executor`] for running a query through it.
pub struct Query<E = ()> {
    pub(crate) statement: Statement,
    pub(crate) from: String,
    pub(crate) select_cols: Vec<String>,
    pub(crate) where_clauses: Vec<WhereClause>,
    pub(crate) joins: [Vec<Fragment>; 4],
    pub(crate) group_by: Vec<String>,
    pub(crate) order_by: Vec<String>,
    pub(crate) having: Vec<Fragment>,
    pub(crate) limit: i64,
    pub(crate) offset: i64,
    pub(crate) raw: Option<Fragment>,
    pub(crate) executor: Option<E>,
}

impl Query {
    /// Create an empty query without an executor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Query<E> {
    /// Create an empty query bound to an executor handle.
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor: Some(executor),
            ..Self::default()
        }
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    /// Selected columns; empty means `*`.
    pub fn select_cols(&self) -> &[String] {
        &self.select_cols
    }

    pub fn where_clauses(&self) -> &[WhereClause] {
        &self.where_clauses
    }

    pub fn joins(&self, kind: JoinKind) -> &[Fragment] {
        &self.joins[kind.index()]
    }

    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    pub fn order_by(&self) -> &[String] {
        &self.order_by
    }

    pub fn having(&self) -> &[Fragment] {
        &self.having
    }

    /// `0` means no LIMIT.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// `0` means no OFFSET.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// The raw override, if [`set_sql`](crate::set_sql) was called.
    pub fn raw(&self) -> Option<&Fragment> {
        self.raw.as_ref()
    }

    pub fn executor(&self) -> Option<&E> {
        self.executor.as_ref()
    }

    /// Remove and return the executor handle.
    pub fn take_executor(&mut self) -> Option<E> {
        self.executor.take()
    }
}

impl<E> Default for Query<E> {
    fn default() -> Self {
        Self {
            statement: Statement::Select,
            from: String::new(),
            select_cols: Vec::new(),
            where_clauses: Vec::new(),
            joins: Default::default(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            having: Vec::new(),
            limit: 0,
            offset: 0,
            raw: None,
            executor: None,
        }
    }
}

impl<E: Clone> Clone for Query<E> {
    fn clone(&self) -> Self {
        Self {
            statement: self.statement.clone(),
            from: self.from.clone(),
            select_cols: self.select_cols.clone(),
            where_clauses: self.where_clauses.clone(),
            joins: self.joins.clone(),
            group_by: self.group_by.clone(),
            order_by: self.order_by.clone(),
            having: self.having.clone(),
            limit: self.limit,
            offset: self.offset,
            raw: self.raw.clone(),
            executor: self.executor.clone(),
        }
    }
}

impl<E> fmt::Debug for Query<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("statement", &self.statement)
            .field("from", &self.from)
            .field("select_cols", &self.select_cols)
            .field("where_clauses", &self.where_clauses)
            .field("joins", &self.joins)
            .field("group_by", &self.group_by)
            .field("order_by", &self.order_by)
            .field("having", &self.having)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("raw", &self.raw)
            .field("has_executor", &self.executor.is_some())
            .finish()
    }
}
