//! Execute a write execution plan against the database.

use tracing::{info_span, Instrument};

use query_engine_sql::sql;

use crate::error::Error;
use crate::metrics;
use crate::query::fetch_rows;

/// Execute every statement of a mutation inside a single transaction.
///
/// Either all statements commit or none do. Rows are returned in statement order.
pub async fn execute(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    plan: sql::execution_plan::ExecutionPlan<sql::execution_plan::Mutation>,
) -> Result<serde_json::Value, Error> {
    let statements = plan.query.statements_sql();

    tracing::debug!(
        table = %plan.table,
        statements = statements.len(),
        generated_sql = ?statements.iter().map(|statement| &statement.sql).collect::<Vec<_>>(),
        "executing mutation"
    );

    let rows = async {
        let mut transaction = pool.begin().await?;
        let mut rows = vec![];
        for statement in &statements {
            rows.extend(fetch_rows(&mut *transaction, statement).await?);
        }
        transaction.commit().await?;
        Ok::<_, Error>(rows)
    }
    .instrument(info_span!("Database transaction"))
    .await?;

    metrics.mutation_total.inc();

    Ok(match plan.query.returns {
        sql::execution_plan::MutationReturns::FirstRow => {
            rows.into_iter().next().unwrap_or(serde_json::Value::Null)
        }
        sql::execution_plan::MutationReturns::AllRows => serde_json::Value::Array(rows),
    })
}
