//! Translate `POST /api/{table}`.

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use super::{describe_json_kind, translate_body_columns};
use crate::translation::error::{Error, MutationKind};
use crate::translation::helpers::{Env, TableNameAndReference};

/// Translate an insert. A single object inserts one row and returns it; an array
/// inserts one row per element and returns them in input order.
pub fn translate(
    metadata: &metadata::Metadata,
    table_name: &str,
    body: &serde_json::Value,
) -> Result<sql::execution_plan::ExecutionPlan<sql::execution_plan::Mutation>, Error> {
    let env = Env::new(metadata);
    let table_info = env.lookup_table(table_name)?;
    let table = TableNameAndReference::aliased(table_info, table_name);

    let (objects, returns) = match body {
        serde_json::Value::Object(object) => (
            vec![object],
            sql::execution_plan::MutationReturns::FirstRow,
        ),
        serde_json::Value::Array(elements) if elements.is_empty() => {
            return Err(Error::MissingBody(MutationKind::Insert))
        }
        serde_json::Value::Array(elements) => (
            elements
                .iter()
                .enumerate()
                .map(|(index, element)| match element {
                    serde_json::Value::Object(object) => Ok(object),
                    other => Err(Error::InvalidBody(format!(
                        "element {index} is {}, expected an object",
                        describe_json_kind(other)
                    ))),
                })
                .collect::<Result<Vec<_>, Error>>()?,
            sql::execution_plan::MutationReturns::AllRows,
        ),
        other => {
            return Err(Error::InvalidBody(format!(
                "got {}, expected an object or an array of objects",
                describe_json_kind(other)
            )))
        }
    };

    let statements = objects
        .into_iter()
        .map(|object| {
            let (columns, values) = translate_body_columns(&table, object)?
                .into_iter()
                .unzip();
            let insert = sql::ast::Insert {
                schema: sql::ast::SchemaName(table_info.schema_name.clone()),
                table: sql::ast::TableName(table_info.table_name.clone()),
                columns,
                values,
                returning: table.returning(),
            };
            Ok(sql::helpers::select_mutation_as_json(
                sql::ast::CTExpr::Insert(insert),
            ))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    tracing::debug!(
        table = table_name,
        statements = statements.len(),
        "translated insert"
    );
    Ok(sql::execution_plan::simple_mutation_execution_plan(
        table_name.to_string(),
        statements,
        returns,
    ))
}
