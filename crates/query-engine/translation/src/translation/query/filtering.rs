//! Handle filtering/where clauses translation.
//!
//! A filter is a query-string pair `column=[operator.]value`, for example
//! `current_stock=lte.5` or `supplier_id=not.is.null`.

use enum_iterator::Sequence;

use query_engine_sql::sql;

use super::values;
use crate::translation::error::Error;
use crate::translation::helpers::TableNameAndReference;

/// The operator tokens a filter value may start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum FilterOperator {
    Eq,
    Neq,
    Gte,
    Lte,
    Is,
    Not,
}

impl FilterOperator {
    pub fn token(self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Gte => "gte",
            FilterOperator::Lte => "lte",
            FilterOperator::Is => "is",
            FilterOperator::Not => "not",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        enum_iterator::all::<FilterOperator>().find(|operator| operator.token() == token)
    }
}

/// Split a raw filter value into its operator and literal.
///
/// A value of the form `word.rest` where `word` is a known operator yields
/// `(word, rest)`. Anything else, including an unknown word before a dot, is
/// an equality test against the whole value.
pub fn parse_filter_value(raw: &str) -> (FilterOperator, &str) {
    split_operator(raw, |_| true)
}

/// The second level of a `not.` filter: every operator except `not`.
fn parse_negated_value(raw: &str) -> (FilterOperator, &str) {
    split_operator(raw, |operator| operator != FilterOperator::Not)
}

fn split_operator(
    raw: &str,
    allowed: impl Fn(FilterOperator) -> bool,
) -> (FilterOperator, &str) {
    raw.split_once('.')
        .and_then(|(token, rest)| {
            FilterOperator::from_token(token)
                .filter(|operator| allowed(*operator))
                .map(|operator| (operator, rest))
        })
        .unwrap_or((FilterOperator::Eq, raw))
}

/// The literals `is` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsLiteral {
    Null,
    True,
    False,
}

impl IsLiteral {
    fn parse(value: &str) -> Result<Self, Error> {
        match value.to_ascii_lowercase().as_str() {
            "null" => Ok(IsLiteral::Null),
            "true" => Ok(IsLiteral::True),
            "false" => Ok(IsLiteral::False),
            _ => Err(Error::InvalidIsValue(value.to_string())),
        }
    }
}

/// A parsed filter condition on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Compare {
        operator: sql::ast::BinaryOperator,
        value: String,
    },
    Is(IsLiteral),
    Not(Box<Condition>),
}

impl Condition {
    /// Parse a raw filter value.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let (operator, rest) = parse_filter_value(raw);
        Self::from_parts(operator, rest)
    }

    fn from_parts(operator: FilterOperator, value: &str) -> Result<Self, Error> {
        let compare = |operator| {
            Ok(Condition::Compare {
                operator,
                value: value.to_string(),
            })
        };
        match operator {
            FilterOperator::Eq => compare(sql::ast::BinaryOperator::Equals),
            FilterOperator::Neq => compare(sql::ast::BinaryOperator::NotEquals),
            FilterOperator::Gte => compare(sql::ast::BinaryOperator::GreaterThanOrEqualTo),
            FilterOperator::Lte => compare(sql::ast::BinaryOperator::LessThanOrEqualTo),
            FilterOperator::Is => Ok(Condition::Is(IsLiteral::parse(value)?)),
            FilterOperator::Not => {
                let (inner_operator, inner_value) = parse_negated_value(value);
                Ok(Condition::Not(Box::new(Self::from_parts(
                    inner_operator,
                    inner_value,
                )?)))
            }
        }
    }
}

/// Translate every filter of a request into a list of conditions, in query-string order.
pub fn translate_filters(
    table: &TableNameAndReference,
    filters: &[(String, String)],
) -> Result<Vec<sql::ast::Expression>, Error> {
    filters
        .iter()
        .map(|(column, raw)| {
            let column_info = table.lookup_readable_column(column)?;
            let condition = Condition::parse(raw)?;
            Ok(translate_condition(
                table.column_expression(column_info),
                column_info.r#type,
                condition,
            ))
        })
        .collect()
}

/// Translate filters and combine them with `AND`.
pub fn translate_where(
    table: &TableNameAndReference,
    filters: &[(String, String)],
) -> Result<sql::ast::Where, Error> {
    Ok(sql::ast::Where(sql::helpers::conjunction(
        translate_filters(table, filters)?,
    )))
}

fn translate_condition(
    column: sql::ast::Expression,
    scalar_type: query_engine_metadata::metadata::ScalarType,
    condition: Condition,
) -> sql::ast::Expression {
    let unary = |column, operator| sql::ast::Expression::UnaryOperation {
        expression: Box::new(column),
        operator,
    };
    match condition {
        Condition::Compare { operator, value } => sql::ast::Expression::BinaryOperation {
            left: Box::new(column),
            operator,
            right: Box::new(values::translate_text_value(&value, scalar_type)),
        },
        Condition::Is(IsLiteral::Null) => unary(column, sql::ast::UnaryOperator::IsNull),
        Condition::Is(IsLiteral::True) => unary(column, sql::ast::UnaryOperator::IsTrue),
        Condition::Is(IsLiteral::False) => unary(column, sql::ast::UnaryOperator::IsFalse),
        Condition::Not(inner) => match *inner {
            Condition::Is(IsLiteral::Null) => unary(column, sql::ast::UnaryOperator::IsNotNull),
            inner => sql::ast::Expression::Not(Box::new(translate_condition(
                column,
                scalar_type,
                inner,
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_token_is_recognised() {
        for operator in enum_iterator::all::<FilterOperator>() {
            for value in ["5", "", "a.b", "Blue Widget"] {
                let raw = format!("{}.{value}", operator.token());
                assert_eq!(parse_filter_value(&raw), (operator, value), "{raw}");
            }
        }
    }

    #[test]
    fn bare_values_are_equality_tests() {
        for raw in ["5", "Widget", "gt.5", "like.a%", "a.b.c", "EQ.5"] {
            assert_eq!(parse_filter_value(raw), (FilterOperator::Eq, raw));
        }
    }

    #[test]
    fn not_parses_a_second_level() {
        assert_eq!(
            Condition::parse("not.is.null"),
            Ok(Condition::Not(Box::new(Condition::Is(IsLiteral::Null))))
        );
        assert_eq!(
            Condition::parse("not.eq.x"),
            Ok(Condition::Not(Box::new(Condition::Compare {
                operator: sql::ast::BinaryOperator::Equals,
                value: "x".to_string(),
            })))
        );
        assert_eq!(
            Condition::parse("not.not.x"),
            Ok(Condition::Not(Box::new(Condition::Compare {
                operator: sql::ast::BinaryOperator::Equals,
                value: "not.x".to_string(),
            })))
        );
    }

    #[test]
    fn is_accepts_only_null_true_and_false() {
        assert_eq!(
            Condition::parse("is.NULL"),
            Ok(Condition::Is(IsLiteral::Null))
        );
        assert_eq!(
            Condition::parse("is.True"),
            Ok(Condition::Is(IsLiteral::True))
        );
        assert_eq!(
            Condition::parse("is.5"),
            Err(Error::InvalidIsValue("5".to_string()))
        );
        assert_eq!(
            Condition::parse("not.is.nothing"),
            Err(Error::InvalidIsValue("nothing".to_string()))
        );
    }
}
