//! Handle the `order` expression: `column[.asc|.desc]`, comma separated.

use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::TableNameAndReference;

/// Parse an order expression into `(column, direction)` pairs, in request order.
pub fn parse_order(order: &str) -> Result<Vec<(String, sql::ast::OrderByDirection)>, Error> {
    order
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| match term.split_once('.') {
            None => Ok((term.to_string(), sql::ast::OrderByDirection::Asc)),
            Some((column, "asc")) => Ok((column.to_string(), sql::ast::OrderByDirection::Asc)),
            Some((column, "desc")) => Ok((column.to_string(), sql::ast::OrderByDirection::Desc)),
            Some((column, direction)) => Err(Error::InvalidOrderDirection {
                column: column.to_string(),
                direction: direction.to_string(),
            }),
        })
        .collect()
}

/// Convert the order expression of a request to a SQL ORDER BY clause.
pub fn translate_order_by(
    table: &TableNameAndReference,
    order: Option<&str>,
) -> Result<sql::ast::OrderBy, Error> {
    let elements = match order {
        None => vec![],
        Some(order) => parse_order(order)?
            .into_iter()
            .map(|(column, direction)| {
                let column = table.lookup_readable_column(&column)?;
                Ok(sql::ast::OrderByElement {
                    target: table.column_expression(column),
                    direction,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?,
    };
    Ok(sql::ast::OrderBy { elements })
}
