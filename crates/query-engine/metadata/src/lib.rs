//! Metadata about the tables, columns and relationships the gateway is allowed to touch.

pub mod metadata;
