//! Look up a user's credentials for `POST /api/auth/login`.

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use super::error::Error;
use super::helpers::{Env, TableNameAndReference};
use super::query::values;

pub const USERS_TABLE: &str = "users";
pub const USERNAME_COLUMN: &str = "username";
/// The write-only column holding the hex SHA-256 digest of a user's password.
pub const PASSWORD_HASH_COLUMN: &str = "password_hash";

/// Select the readable columns of the user with the given name, plus its password hash.
pub fn translate_credentials_lookup(
    metadata: &metadata::Metadata,
    username: &str,
) -> Result<sql::execution_plan::ExecutionPlan<sql::execution_plan::Query>, Error> {
    let env = Env::new(metadata);
    let users = TableNameAndReference::aliased(env.lookup_table(USERS_TABLE)?, USERS_TABLE);

    let mut select_list = users
        .info
        .readable_columns()
        .map(|column| {
            (
                sql::helpers::make_column_alias(column.name.clone()),
                users.column_expression(column),
            )
        })
        .collect::<Vec<_>>();
    let password_hash = users.lookup_writable_column(PASSWORD_HASH_COLUMN)?;
    select_list.push((
        sql::helpers::make_column_alias(password_hash.name.clone()),
        users.column_expression(password_hash),
    ));

    let username_column = users.lookup_readable_column(USERNAME_COLUMN)?;
    let mut select = sql::helpers::simple_select(select_list);
    select.from = Some(sql::ast::From::Table {
        reference: users.db_table(),
        alias: users.alias(),
    });
    select.where_ = sql::ast::Where(sql::ast::Expression::BinaryOperation {
        left: Box::new(users.column_expression(username_column)),
        operator: sql::ast::BinaryOperator::Equals,
        right: Box::new(values::translate_text_value(
            username,
            username_column.r#type,
        )),
    });

    Ok(sql::execution_plan::simple_query_execution_plan(
        USERS_TABLE.to_string(),
        sql::helpers::select_rows_as_json(select),
    ))
}
