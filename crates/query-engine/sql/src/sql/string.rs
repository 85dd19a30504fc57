//! Type definitions of a low-level SQL string representation.

/// A SQL statement with its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// A parameter for a parameterized query.
///
/// Parameters are always sent as text (or NULL); the statement casts them to the
/// column's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A text value
    String(String),
    /// SQL NULL
    Null,
}

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
        }
    }

    /// Append raw SQL syntax. Never pass anything that came from a request here.
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a double-quoted identifier, doubling any embedded quotes.
    pub fn append_identifier(&mut self, identifier: &str) {
        self.sql.push('"');
        self.sql.push_str(&identifier.replace('"', "\"\""));
        self.sql.push('"');
    }

    /// Append a single-quoted string literal, doubling any embedded quotes.
    pub fn append_string_literal(&mut self, literal: &str) {
        self.sql.push('\'');
        self.sql.push_str(&literal.replace('\'', "''"));
        self.sql.push('\'');
    }

    /// Append a positional parameter placeholder (`$1`, `$2`, ...) and record its value.
    pub fn append_param(&mut self, param: Param) {
        self.params.push(param);
        self.sql.push_str(format!("${}", self.params.len()).as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_and_literals_are_escaped() {
        let mut sql = SQL::new();
        sql.append_identifier("we\"ird");
        sql.append_syntax(" = ");
        sql.append_string_literal("it's");

        assert_eq!(sql.sql, "\"we\"\"ird\" = 'it''s'");
    }

    #[test]
    fn params_are_numbered_in_order() {
        let mut sql = SQL::new();
        sql.append_param(Param::String("a".to_string()));
        sql.append_syntax(", ");
        sql.append_param(Param::Null);

        assert_eq!(sql.sql, "$1, $2");
        assert_eq!(
            sql.params,
            vec![Param::String("a".to_string()), Param::Null]
        );
    }
}
