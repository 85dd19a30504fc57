//! Handle the `select` expression: plain columns, `*` and embedded relations.

use indexmap::IndexMap;

use query_engine_sql::sql;

use super::relationships;
use crate::translation::error::Error;
use crate::translation::helpers::{Env, TableNameAndReference};

/// One comma-separated term of a select expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectTerm {
    /// `*`: every readable column.
    Star,
    /// A plain column.
    Column(String),
    /// `relation(col1,col2,...)`, where a column may also be `*`.
    Relation { name: String, columns: Vec<String> },
}

/// Parse a select expression. An absent or blank expression means `*`.
pub fn parse_select(select: Option<&str>) -> Result<Vec<SelectTerm>, Error> {
    let select = select.unwrap_or_default();
    let terms = split_top_level(select)?
        .into_iter()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(parse_term)
        .collect::<Result<Vec<_>, Error>>()?;

    if terms.is_empty() {
        Ok(vec![SelectTerm::Star])
    } else {
        Ok(terms)
    }
}

/// Split on commas that are not inside parentheses.
fn split_top_level(select: &str) -> Result<Vec<&str>, Error> {
    let mut terms = vec![];
    let mut depth = 0usize;
    let mut start = 0;

    for (index, c) in select.char_indices() {
        match c {
            '(' => {
                depth += 1;
                if depth > 1 {
                    return Err(Error::MalformedSelect(
                        "nested relations are not supported".to_string(),
                    ));
                }
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::MalformedSelect("unbalanced parentheses".to_string())
                })?;
            }
            ',' if depth == 0 => {
                terms.push(&select[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::MalformedSelect(
            "unbalanced parentheses".to_string(),
        ));
    }
    terms.push(&select[start..]);
    Ok(terms)
}

fn parse_term(term: &str) -> Result<SelectTerm, Error> {
    match term.split_once('(') {
        None if term == "*" => Ok(SelectTerm::Star),
        None => Ok(SelectTerm::Column(term.to_string())),
        Some((name, rest)) => {
            let name = name.trim();
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| Error::MalformedSelect(format!("unexpected text after '{term}'")))?;
            if name.is_empty() {
                return Err(Error::MalformedSelect(format!(
                    "missing relation name in '{term}'"
                )));
            }
            let columns = inner
                .split(',')
                .map(str::trim)
                .filter(|column| !column.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            if columns.is_empty() {
                return Err(Error::MalformedSelect(format!(
                    "no columns requested for relation '{name}'"
                )));
            }
            Ok(SelectTerm::Relation {
                name: name.to_string(),
                columns,
            })
        }
    }
}

/// Translate the field-selection of a query to SQL: a select list in request order,
/// and the joins embedded relations need.
///
/// A field requested twice is only projected once, at its first position.
pub(crate) fn translate_fields(
    env: &Env,
    current_table: &TableNameAndReference,
    terms: Vec<SelectTerm>,
) -> Result<(Vec<(sql::ast::ColumnAlias, sql::ast::Expression)>, Vec<sql::ast::Join>), Error> {
    let mut columns: IndexMap<String, sql::ast::Expression> = IndexMap::new();
    let mut joins = vec![];

    for term in terms {
        match term {
            SelectTerm::Star => {
                for column in current_table.info.readable_columns() {
                    columns
                        .entry(column.name.clone())
                        .or_insert_with(|| current_table.column_expression(column));
                }
            }
            SelectTerm::Column(name) => {
                let column = current_table.lookup_readable_column(&name)?;
                columns
                    .entry(name)
                    .or_insert_with(|| current_table.column_expression(column));
            }
            SelectTerm::Relation { name, columns: requested } => {
                if columns.contains_key(&name) {
                    continue;
                }
                let relationships::EmbeddedRelation { join, expression } =
                    relationships::translate_relation(env, current_table, &name, &requested)?;
                joins.push(join);
                columns.insert(name, expression);
            }
        }
    }

    Ok((
        columns
            .into_iter()
            .map(|(alias, expression)| (sql::helpers::make_column_alias(alias), expression))
            .collect(),
        joins,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(name: &str, columns: &[&str]) -> SelectTerm {
        SelectTerm::Relation {
            name: name.to_string(),
            columns: columns.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn relations_and_columns_are_split_at_the_top_level() {
        assert_eq!(
            parse_select(Some("*, categories(id, name),suppliers(*) ,sku")),
            Ok(vec![
                SelectTerm::Star,
                relation("categories", &["id", "name"]),
                relation("suppliers", &["*"]),
                SelectTerm::Column("sku".to_string()),
            ])
        );
    }

    #[test]
    fn missing_or_blank_select_means_star() {
        assert_eq!(parse_select(None), Ok(vec![SelectTerm::Star]));
        assert_eq!(parse_select(Some(" , ")), Ok(vec![SelectTerm::Star]));
    }

    #[test]
    fn malformed_selects_are_rejected() {
        for select in [
            "categories(id,name",
            "categories)id(",
            "id)",
            "categories()",
            "categories( , )",
            "(id)",
            "categories(id)x",
            "products(categories(id))",
        ] {
            assert!(
                matches!(parse_select(Some(select)), Err(Error::MalformedSelect(_))),
                "{select}"
            );
        }
    }
}
