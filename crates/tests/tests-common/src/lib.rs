//! Helpers shared by the gateway's test suites.

pub mod database;
pub mod request;
pub mod router;
