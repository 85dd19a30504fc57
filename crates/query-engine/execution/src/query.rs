//! Execute a read execution plan against the database.

use sqlx::Row;
use tracing::{info_span, Instrument};

use query_engine_sql::sql;

use crate::error::{Error, QueryError};
use crate::metrics;

/// Execute a query against postgres. Returns the JSON array of matching rows.
pub async fn execute(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    plan: sql::execution_plan::ExecutionPlan<sql::execution_plan::Query>,
) -> Result<serde_json::Value, Error> {
    let query = plan.query.query_sql();

    tracing::debug!(
        table = %plan.table,
        generated_sql = %query.sql,
        params = query.params.len(),
        "executing query"
    );

    let rows = fetch_rows(pool, &query)
        .instrument(info_span!("Database request"))
        .await?;

    metrics.query_total.inc();
    Ok(serde_json::Value::Array(rows))
}

/// Run a statement that returns one row with one JSON array column, and return the array.
pub(crate) async fn fetch_rows<'e, E>(
    executor: E,
    query: &sql::string::SQL,
) -> Result<Vec<serde_json::Value>, Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let row = build_query_with_params(query).fetch_one(executor).await?;
    match row.try_get::<serde_json::Value, _>(0)? {
        serde_json::Value::Array(rows) => Ok(rows),
        other => Err(Error::Query(QueryError::UnexpectedResult(other))),
    }
}

/// Create a SQLx query based on our SQL query and bind our parameters to it.
/// Every parameter is sent as text; the statement casts it to the column's type.
fn build_query_with_params(
    query: &sql::string::SQL,
) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .params
        .iter()
        .fold(sqlx::query(query.sql.as_str()), |sqlx_query, param| match param {
            sql::string::Param::String(s) => sqlx_query.bind(s.as_str()),
            sql::string::Param::Null => sqlx_query.bind(None::<&str>),
        })
}
