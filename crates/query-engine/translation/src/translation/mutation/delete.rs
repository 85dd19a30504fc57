//! Translate `DELETE /api/{table}`.

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use crate::translation::error::{Error, MutationKind};
use crate::translation::helpers::{Env, TableNameAndReference};
use crate::translation::query::filtering;
use crate::translation::request::Arguments;

/// Translate a delete. At least one filter is required.
pub fn translate(
    metadata: &metadata::Metadata,
    table_name: &str,
    arguments: &Arguments,
) -> Result<sql::execution_plan::ExecutionPlan<sql::execution_plan::Mutation>, Error> {
    let env = Env::new(metadata);
    let table_info = env.lookup_table(table_name)?;
    let table = TableNameAndReference::aliased(table_info, table_name);

    if arguments.filters.is_empty() {
        return Err(Error::MissingFilter(MutationKind::Delete));
    }

    let delete = sql::ast::Delete {
        schema: sql::ast::SchemaName(table_info.schema_name.clone()),
        table: sql::ast::TableName(table_info.table_name.clone()),
        alias: table.alias(),
        where_: filtering::translate_where(&table, &arguments.filters)?,
        returning: table.returning(),
    };

    tracing::debug!(table = table_name, "translated delete");
    Ok(sql::execution_plan::simple_mutation_execution_plan(
        table_name.to_string(),
        vec![sql::helpers::select_mutation_as_json(
            sql::ast::CTExpr::Delete(delete),
        )],
        sql::execution_plan::MutationReturns::AllRows,
    ))
}
