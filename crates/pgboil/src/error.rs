//! Error types for pgboil

use thiserror::Error;

/// Result type alias for pgboil operations
pub type BoilResult<T> = Result<T, BoilError>;

/// Errors surfaced while rendering or executing a [`Query`](crate::Query).
///
/// Mutators never fail; every render error is a caller contract violation and
/// none of them is transient.
#[derive(Debug, Error)]
pub enum BoilError {
    /// A non-raw statement was rendered without a FROM expression
    #[error("Missing FROM clause: a table or source expression is required")]
    MissingFromClause,

    /// LIMIT/OFFSET (or similar) value outside its allowed range
    #[error("Invalid {clause} value: {value}")]
    InvalidClauseValue { clause: &'static str, value: i64 },

    /// UPDATE statement without any assignment
    #[error("UPDATE requires at least one SET assignment")]
    EmptyUpdate,

    /// A clause's local placeholders do not line up with its arguments
    #[error(
        "Argument count mismatch in {clause}: placeholders {placeholders:?} do not match {args} argument(s)"
    )]
    ArgumentCountMismatch {
        clause: String,
        placeholders: Vec<usize>,
        args: usize,
    },

    /// The rendered statement needs more bind parameters than allowed
    #[error("Too many bind parameters: {count} exceeds the maximum of {max}")]
    TooManyParams { count: usize, max: usize },

    /// Execution was requested on a query without an executor handle
    #[error("No executor set on query")]
    MissingExecutor,

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl BoilError {
    /// Create an argument count mismatch error for a clause
    pub fn argument_mismatch(clause: impl Into<String>, placeholders: Vec<usize>, args: usize) -> Self {
        Self::ArgumentCountMismatch {
            clause: clause.into(),
            placeholders,
            args,
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a missing FROM clause error
    pub fn is_missing_from(&self) -> bool {
        matches!(self, Self::MissingFromClause)
    }

    /// Check if this is an invalid clause value error
    pub fn is_invalid_clause_value(&self) -> bool {
        matches!(self, Self::InvalidClauseValue { .. })
    }

    /// Check if this is an argument count mismatch error
    pub fn is_argument_mismatch(&self) -> bool {
        matches!(self, Self::ArgumentCountMismatch { .. })
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
