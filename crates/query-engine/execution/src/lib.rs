//! Query execution against a PostgreSQL database.

pub mod error;
pub mod metrics;
pub mod mutation;
pub mod query;
