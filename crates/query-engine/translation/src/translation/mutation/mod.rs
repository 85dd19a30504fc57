//! Translate write requests (`POST`, `PATCH` and `DELETE` on `/api/{table}`).

pub mod delete;
pub mod insert;
pub mod update;

use query_engine_sql::sql;

use super::error::Error;
use super::helpers::TableNameAndReference;
use super::query::values;

/// Validate the keys of a body object and translate its values, in the table's
/// column declaration order.
fn translate_body_columns(
    table: &TableNameAndReference,
    body: &serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<(sql::ast::ColumnName, sql::ast::Expression)>, Error> {
    for key in body.keys() {
        table.lookup_writable_column(key)?;
    }
    Ok(table
        .info
        .columns
        .values()
        .filter_map(|column| {
            body.get(&column.name).map(|value| {
                (
                    sql::ast::ColumnName(column.name.clone()),
                    values::translate_json_value(value, column.r#type),
                )
            })
        })
        .collect())
}

fn describe_json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
