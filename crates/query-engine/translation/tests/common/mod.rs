use query_engine_metadata::metadata::Metadata;
use query_engine_sql::sql;
use query_engine_translation::translation;
use query_engine_translation::translation::request::Arguments;

/// Translate a read against the inventory catalog and render it.
pub fn translate_read(table: &str, query: &str) -> Result<sql::string::SQL, translation::error::Error> {
    let plan = translation::query::translate(
        &Metadata::inventory(),
        table,
        &Arguments::parse(Some(query)),
    )?;
    Ok(plan.query.query_sql())
}

/// Translate a write against the inventory catalog and render each of its statements.
pub fn translate_write(
    method: &str,
    table: &str,
    query: &str,
    body: &serde_json::Value,
) -> Result<
    (
        Vec<sql::string::SQL>,
        sql::execution_plan::MutationReturns,
    ),
    translation::error::Error,
> {
    let metadata = Metadata::inventory();
    let arguments = Arguments::parse(Some(query));
    let plan = match method {
        "POST" => translation::mutation::insert::translate(&metadata, table, body)?,
        "PATCH" => translation::mutation::update::translate(&metadata, table, &arguments, body)?,
        "DELETE" => translation::mutation::delete::translate(&metadata, table, &arguments)?,
        other => panic!("unexpected method {other}"),
    };
    Ok((plan.query.statements_sql(), plan.query.returns))
}

pub fn text(value: &str) -> sql::string::Param {
    sql::string::Param::String(value.to_string())
}
