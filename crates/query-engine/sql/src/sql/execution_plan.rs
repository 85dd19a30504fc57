//! Describe the SQL execution plan.

use super::ast;
use super::string;

/// Definition of an execution plan to be run against the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan<Query> {
    /// The table the request was made against.
    pub table: String,
    pub query: Query,
}

/// A read: a single statement returning one row with a JSON array of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub select: ast::Select,
}

impl Query {
    /// Extract the query component as SQL.
    pub fn query_sql(&self) -> string::SQL {
        select_to_sql(&self.select)
    }
}

/// What a mutation hands back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationReturns {
    /// A single JSON object (or `null` when nothing was returned).
    FirstRow,
    /// A JSON array of every affected row.
    AllRows,
}

/// A write: one or more statements run inside a single transaction.
/// Each returns one row with a JSON array of the rows it touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub statements: Vec<ast::Select>,
    pub returns: MutationReturns,
}

impl Mutation {
    pub fn statements_sql(&self) -> Vec<string::SQL> {
        self.statements.iter().map(select_to_sql).collect()
    }
}

pub fn select_to_sql(select: &ast::Select) -> string::SQL {
    let mut sql = string::SQL::new();
    select.to_sql(&mut sql);
    sql
}

/// A simple query execution plan with only a table and a query.
pub fn simple_query_execution_plan(table: String, select: ast::Select) -> ExecutionPlan<Query> {
    ExecutionPlan {
        table,
        query: Query { select },
    }
}

/// A simple mutation execution plan.
pub fn simple_mutation_execution_plan(
    table: String,
    statements: Vec<ast::Select>,
    returns: MutationReturns,
) -> ExecutionPlan<Mutation> {
    ExecutionPlan {
        table,
        query: Mutation {
            statements,
            returns,
        },
    }
}
