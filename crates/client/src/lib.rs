//! A client for the inventory gateway's table API.
//!
//! Requests are described with [`TableRequest`], which only accumulates intent;
//! nothing is sent until [`TableRequest::execute`] is called.

pub mod client;
pub mod error;
pub mod request;

pub use client::InventoryClient;
pub use error::ClientError;
pub use request::{Operation, TableRequest};
