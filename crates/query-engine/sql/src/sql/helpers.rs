//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

/// The alias given to the subquery whose rows are aggregated into a JSON array.
pub const ROWS_ALIAS: &str = "_rows";
/// The alias given to the data-modifying CTE of a mutation.
pub const MUTATION_ALIAS: &str = "_mutation";
/// The single column every statement we generate returns.
pub const RESULT_COLUMN: &str = "rows";

// Empty clauses //

/// An empty `WITH` clause.
pub fn empty_with() -> With {
    With {
        common_table_expressions: vec![],
    }
}

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    true_expr()
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// Combine conditions with `AND`, left to right. No conditions means `true`.
pub fn conjunction(expressions: Vec<Expression>) -> Expression {
    expressions
        .into_iter()
        .reduce(|left, right| Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        })
        .unwrap_or_else(true_expr)
}

// Aliasing //

/// Create table aliases using this function so we build everything in one place.
pub fn make_table_alias(name: String) -> TableAlias {
    TableAlias { name }
}

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: String) -> ColumnAlias {
    ColumnAlias { name }
}

/// A reference to a table in the given schema.
pub fn make_db_table_reference(schema: &str, table: &str) -> TableReference {
    TableReference::DBTable {
        schema: SchemaName(schema.to_string()),
        table: TableName(table.to_string()),
    }
}

/// Generate a column expression refering to a specific table.
pub fn make_column(table: TableReference, name: ColumnName) -> Expression {
    Expression::ColumnReference(ColumnReference::TableColumn { table, name })
}

// SELECTs //

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: Vec<(ColumnAlias, Expression)>) -> Select {
    Select {
        with: empty_with(),
        select_list: SelectList(select_list),
        from: None,
        joins: vec![],
        where_: Where(empty_where()),
        order_by: empty_order_by(),
    }
}

/// `coalesce(json_agg(row_to_json("alias")), '[]')`
fn json_agg_rows(alias: &TableAlias) -> Expression {
    Expression::FunctionCall {
        function: Function::Coalesce,
        args: vec![
            Expression::FunctionCall {
                function: Function::JsonAgg,
                args: vec![Expression::RowToJson(TableReference::AliasedTable(
                    alias.clone(),
                ))],
            },
            Expression::Value(Value::String("[]".to_string())),
        ],
    }
}

/// Wrap a select so that its rows come back as a single JSON array:
///
/// ```sql
/// SELECT coalesce(json_agg(row_to_json("_rows")), '[]') AS "rows"
/// FROM (<select>) AS "_rows"
/// ```
pub fn select_rows_as_json(select: Select) -> Select {
    let alias = make_table_alias(ROWS_ALIAS.to_string());
    let mut outer = simple_select(vec![(
        make_column_alias(RESULT_COLUMN.to_string()),
        json_agg_rows(&alias),
    )]);
    outer.from = Some(From::Select {
        select: Box::new(select),
        alias,
    });
    outer
}

/// Run a data-modifying statement in a CTE and return what it returned as a JSON array:
///
/// ```sql
/// WITH "_mutation" AS (<statement> RETURNING ...)
/// SELECT coalesce(json_agg(row_to_json("_mutation")), '[]') AS "rows"
/// FROM "_mutation" AS "_mutation"
/// ```
pub fn select_mutation_as_json(statement: CTExpr) -> Select {
    let alias = make_table_alias(MUTATION_ALIAS.to_string());
    let mut outer = simple_select(vec![(
        make_column_alias(RESULT_COLUMN.to_string()),
        json_agg_rows(&alias),
    )]);
    outer.with = With {
        common_table_expressions: vec![CommonTableExpression {
            alias: alias.clone(),
            select: statement,
        }],
    };
    outer.from = Some(From::Table {
        reference: TableReference::AliasedTable(alias.clone()),
        alias,
    });
    outer
}
