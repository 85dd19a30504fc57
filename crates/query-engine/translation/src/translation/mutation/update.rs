//! Translate `PATCH /api/{table}`.

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use super::{describe_json_kind, translate_body_columns};
use crate::translation::error::{Error, MutationKind};
use crate::translation::helpers::{Env, TableNameAndReference};
use crate::translation::query::filtering;
use crate::translation::request::Arguments;

/// Check the parts of an update that do not depend on its body: the table
/// must be known and at least one filter given.
pub fn check_target(
    metadata: &metadata::Metadata,
    table_name: &str,
    arguments: &Arguments,
) -> Result<(), Error> {
    Env::new(metadata).lookup_table(table_name)?;
    if arguments.filters.is_empty() {
        return Err(Error::MissingFilter(MutationKind::Update));
    }
    Ok(())
}

/// Translate an update. At least one filter and one body field are required,
/// so a request can never rewrite a whole table.
pub fn translate(
    metadata: &metadata::Metadata,
    table_name: &str,
    arguments: &Arguments,
    body: &serde_json::Value,
) -> Result<sql::execution_plan::ExecutionPlan<sql::execution_plan::Mutation>, Error> {
    check_target(metadata, table_name, arguments)?;
    let env = Env::new(metadata);
    let table_info = env.lookup_table(table_name)?;
    let table = TableNameAndReference::aliased(table_info, table_name);

    let object = match body {
        serde_json::Value::Object(object) => object,
        other => {
            return Err(Error::InvalidBody(format!(
                "got {}, expected an object",
                describe_json_kind(other)
            )))
        }
    };
    if object.is_empty() {
        return Err(Error::MissingBody(MutationKind::Update));
    }

    let update = sql::ast::Update {
        schema: sql::ast::SchemaName(table_info.schema_name.clone()),
        table: sql::ast::TableName(table_info.table_name.clone()),
        alias: table.alias(),
        set: translate_body_columns(&table, object)?,
        where_: filtering::translate_where(&table, &arguments.filters)?,
        returning: table.returning(),
    };

    tracing::debug!(table = table_name, "translated update");
    Ok(sql::execution_plan::simple_mutation_execution_plan(
        table_name.to_string(),
        vec![sql::helpers::select_mutation_as_json(
            sql::ast::CTExpr::Update(update),
        )],
        sql::execution_plan::MutationReturns::AllRows,
    ))
}
