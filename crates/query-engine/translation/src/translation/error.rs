//! Errors for translation.

use std::fmt;

/// A type for translation errors.
///
/// Every one of these is raised before any SQL reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown table '{0}'")]
    UnknownTable(String),
    #[error("unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },
    #[error("unknown relationship '{relationship}' on table '{table}'")]
    UnknownRelationship { table: String, relationship: String },
    #[error("missing filter for {0}")]
    MissingFilter(MutationKind),
    #[error("missing body for {0}")]
    MissingBody(MutationKind),
    #[error("invalid body: {0}")]
    InvalidBody(String),
    #[error("malformed select: {0}")]
    MalformedSelect(String),
    #[error("invalid order direction '{direction}' for column '{column}'")]
    InvalidOrderDirection { column: String, direction: String },
    #[error("invalid value for is: '{0}', expected null, true or false")]
    InvalidIsValue(String),
}

/// The kind of write a request asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Insert => write!(f, "insert"),
            MutationKind::Update => write!(f, "update"),
            MutationKind::Delete => write!(f, "delete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_errors_name_the_operation() {
        assert_eq!(
            Error::MissingFilter(MutationKind::Update).to_string(),
            "missing filter for update"
        );
        assert_eq!(
            Error::MissingFilter(MutationKind::Delete).to_string(),
            "missing filter for delete"
        );
        assert_eq!(
            Error::MissingBody(MutationKind::Insert).to_string(),
            "missing body for insert"
        );
    }
}
