//! Translate a read request (`GET /api/{table}`).

pub mod fields;
pub mod filtering;
pub mod relationships;
pub mod sorting;
pub mod values;

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, TableNameAndReference};
use crate::translation::request::Arguments;

/// Translate a read request to an execution plan (SQL) to be run against the database.
pub fn translate(
    metadata: &metadata::Metadata,
    table_name: &str,
    arguments: &Arguments,
) -> Result<sql::execution_plan::ExecutionPlan<sql::execution_plan::Query>, Error> {
    let env = Env::new(metadata);
    let table_info = env.lookup_table(table_name)?;
    let current_table = TableNameAndReference::aliased(table_info, table_name);

    let terms = fields::parse_select(arguments.select.as_deref())?;
    let (select_list, joins) = fields::translate_fields(&env, &current_table, terms)?;

    let mut select = sql::helpers::simple_select(select_list);
    select.from = Some(sql::ast::From::Table {
        reference: current_table.db_table(),
        alias: current_table.alias(),
    });
    select.joins = joins;
    select.where_ = filtering::translate_where(&current_table, &arguments.filters)?;
    select.order_by = sorting::translate_order_by(&current_table, arguments.order.as_deref())?;

    let json_select = sql::helpers::select_rows_as_json(select);

    tracing::debug!(table = table_name, "SQL AST: {:?}", json_select);
    Ok(sql::execution_plan::simple_query_execution_plan(
        table_name.to_string(),
        json_select,
    ))
}
