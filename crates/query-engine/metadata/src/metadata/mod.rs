//! Metadata information regarding the database and tracked information.

pub mod database;
pub mod inventory;

// re-export without modules
pub use database::*;

use serde::Serialize;

/// Metadata information.
///
/// This is the only schema knowledge the gateway has: it is compiled in and must be
/// kept in sync with the database by whoever operates it.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Metadata {
    pub tables: TablesInfo,
}
