//! Errors for query execution.

/// Query planning error.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("expected the database to return a JSON array, got: {0}")]
    UnexpectedResult(serde_json::Value),
}

/// Execution error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Query(QueryError),
    #[error("{0}")]
    DB(#[from] sqlx::Error),
}
