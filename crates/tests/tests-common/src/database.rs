//! Database fixtures.

use std::path::PathBuf;

pub const SCHEMA_PATH: &str = "static/schema.sql";

/// Find the project root via the crate root provided by `cargo test`.
/// This depends on the convention that this crate lives in `/crates/tests/<name>`.
pub fn get_path_from_project_root(path: &str) -> PathBuf {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("../../../");
    d.push(path);
    d
}

/// Create the inventory tables and the stock trigger, if they do not exist yet.
pub async fn apply_schema(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let schema = tokio::fs::read_to_string(get_path_from_project_root(SCHEMA_PATH)).await?;
    sqlx::raw_sql(&schema).execute(pool).await?;
    Ok(())
}

/// A name no other test run will pick, for rows that must not collide.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
