//! Handle embedded relations: `relation(col1,col2)` in a select expression.

use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, TableNameAndReference};

/// The SQL an embedded relation contributes to the select.
pub struct EmbeddedRelation {
    /// `LEFT OUTER JOIN target AS "relation" ON source.fk = "relation".id`
    pub join: sql::ast::Join,
    /// A JSON object of the requested columns, or NULL when no row was joined.
    pub expression: sql::ast::Expression,
}

/// Translate a many-to-one relation into a join and a `json_build_object` projection.
/// The joined table is aliased by the relation's name.
pub fn translate_relation(
    env: &Env,
    current_table: &TableNameAndReference,
    relationship_name: &str,
    requested_columns: &[String],
) -> Result<EmbeddedRelation, Error> {
    let (relationship, target_info) =
        env.lookup_relationship(current_table.info, relationship_name)?;
    let target = TableNameAndReference::aliased(target_info, relationship_name);

    let mut fields: Vec<(String, Box<sql::ast::Expression>)> = vec![];
    for requested in requested_columns {
        if requested == "*" {
            for column in target.info.readable_columns() {
                push_field(&mut fields, &column.name, target.column_expression(column));
            }
        } else {
            let column = target.lookup_readable_column(requested)?;
            push_field(&mut fields, &column.name, target.column_expression(column));
        }
    }

    let foreign_key = current_table.lookup_writable_column(&relationship.foreign_key_column)?;
    let target_key = target.lookup_readable_column(&relationship.target_column)?;
    let target_key_expression = target.column_expression(target_key);

    let join = sql::ast::Join::LeftOuterJoin(sql::ast::LeftOuterJoin {
        reference: target.db_table(),
        alias: target.alias(),
        on: sql::ast::Expression::BinaryOperation {
            left: Box::new(current_table.column_expression(foreign_key)),
            operator: sql::ast::BinaryOperator::Equals,
            right: Box::new(target_key_expression.clone()),
        },
    });

    let expression = sql::ast::Expression::Case {
        condition: Box::new(sql::ast::Expression::UnaryOperation {
            expression: Box::new(target_key_expression),
            operator: sql::ast::UnaryOperator::IsNull,
        }),
        then: Box::new(sql::ast::Expression::Value(sql::ast::Value::Null)),
        otherwise: Box::new(sql::ast::Expression::JsonBuildObject(fields)),
    };

    Ok(EmbeddedRelation { join, expression })
}

fn push_field(
    fields: &mut Vec<(String, Box<sql::ast::Expression>)>,
    name: &str,
    expression: sql::ast::Expression,
) {
    if fields.iter().all(|(existing, _)| existing != name) {
        fields.push((name.to_string(), Box::new(expression)));
    }
}
