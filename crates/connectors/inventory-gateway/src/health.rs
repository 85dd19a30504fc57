//! Health check for the gateway.

/// Check that the database can be reached and answers a trivial query.
pub async fn health_check(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
