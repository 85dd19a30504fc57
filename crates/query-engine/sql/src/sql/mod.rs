//! Export the SQL AST types, the low-level string representation of a SQL query type,
//! and the execution plans built from them.

pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod helpers;
pub mod string;
