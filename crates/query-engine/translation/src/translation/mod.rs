//! Translate an incoming table request (path, query string, body) to an execution plan
//! (SQL) to be run against the database.

pub mod error;
pub mod helpers;
pub mod login;
pub mod mutation;
pub mod query;
pub mod request;
