//! Handle the translation of literal values.
//!
//! Values are never interpolated: each one becomes a text parameter cast to the
//! column's type, and the database does the conversion.

use query_engine_metadata::metadata::database;
use query_engine_sql::sql;

/// Map a catalog type to the type we cast parameters to.
pub fn translate_scalar_type(scalar_type: database::ScalarType) -> sql::ast::ScalarType {
    match scalar_type {
        database::ScalarType::Boolean => sql::ast::ScalarType::Boolean,
        database::ScalarType::Integer => sql::ast::ScalarType::Integer,
        database::ScalarType::Bigint => sql::ast::ScalarType::Bigint,
        database::ScalarType::Numeric => sql::ast::ScalarType::Numeric,
        database::ScalarType::Text => sql::ast::ScalarType::Text,
        database::ScalarType::Jsonb => sql::ast::ScalarType::Jsonb,
        database::ScalarType::Date => sql::ast::ScalarType::Date,
        database::ScalarType::TimestampWithTimeZone => {
            sql::ast::ScalarType::TimestampWithTimeZone
        }
        database::ScalarType::Uuid => sql::ast::ScalarType::Uuid,
    }
}

/// `CAST($n AS <type>)`
fn cast_param(param: sql::string::Param, scalar_type: database::ScalarType) -> sql::ast::Expression {
    sql::ast::Expression::Cast {
        expression: Box::new(sql::ast::Expression::Value(sql::ast::Value::Parameter(
            param,
        ))),
        r#type: translate_scalar_type(scalar_type),
    }
}

/// Convert a literal taken from the query string.
pub fn translate_text_value(value: &str, scalar_type: database::ScalarType) -> sql::ast::Expression {
    cast_param(sql::string::Param::String(value.to_string()), scalar_type)
}

/// Convert a JSON value from a request body.
///
/// `null` binds as SQL NULL. A `jsonb` column receives the value's JSON text
/// as written, strings included. Otherwise strings bind as their content, and
/// every other value as its JSON text.
pub fn translate_json_value(
    value: &serde_json::Value,
    scalar_type: database::ScalarType,
) -> sql::ast::Expression {
    let param = match value {
        serde_json::Value::Null => sql::string::Param::Null,
        serde_json::Value::String(s) if scalar_type != database::ScalarType::Jsonb => {
            sql::string::Param::String(s.clone())
        }
        serde_json::Value::String(_)
        | serde_json::Value::Number(_)
        | serde_json::Value::Bool(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => sql::string::Param::String(value.to_string()),
    };
    cast_param(param, scalar_type)
}
