//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::helpers;
use super::string::SQL;

// Convert to SQL strings

impl With {
    pub fn to_sql(&self, sql: &mut SQL) {
        if self.common_table_expressions.is_empty() {
            return;
        }

        sql.append_syntax("WITH ");

        let ctes = &self.common_table_expressions;
        for (index, cte) in ctes.iter().enumerate() {
            cte.to_sql(sql);
            if index < (ctes.len() - 1) {
                sql.append_syntax(", ");
            }
        }
        sql.append_syntax(" ");
    }
}

impl CommonTableExpression {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.alias.to_sql(sql);
        sql.append_syntax(" AS (");
        match &self.select {
            CTExpr::Insert(insert) => insert.to_sql(sql),
            CTExpr::Update(update) => update.to_sql(sql),
            CTExpr::Delete(delete) => delete.to_sql(sql),
        }
        sql.append_syntax(")");
    }
}

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.with.to_sql(sql);

        sql.append_syntax("SELECT ");
        self.select_list.to_sql(sql);

        if let Some(from) = &self.from {
            sql.append_syntax(" ");
            from.to_sql(sql);
        }

        for join in &self.joins {
            sql.append_syntax(" ");
            join.to_sql(sql);
        }

        self.where_.to_sql(sql);
        self.order_by.to_sql(sql);
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) {
        let SelectList(select_list) = self;
        for (index, (col, expr)) in select_list.iter().enumerate() {
            expr.to_sql(sql);
            sql.append_syntax(" AS ");
            col.to_sql(sql);
            if index < (select_list.len() - 1) {
                sql.append_syntax(", ");
            }
        }
    }
}

impl Insert {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("INSERT INTO ");
        table_name_to_sql(&self.schema, &self.table, sql);

        if self.columns.is_empty() {
            sql.append_syntax(" DEFAULT VALUES");
        } else {
            sql.append_syntax(" (");
            for (index, column) in self.columns.iter().enumerate() {
                column.to_sql(sql);
                if index < (self.columns.len() - 1) {
                    sql.append_syntax(", ");
                }
            }
            sql.append_syntax(") VALUES (");
            for (index, value) in self.values.iter().enumerate() {
                value.to_sql(sql);
                if index < (self.values.len() - 1) {
                    sql.append_syntax(", ");
                }
            }
            sql.append_syntax(")");
        }

        self.returning.to_sql(sql);
    }
}

impl Update {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("UPDATE ");
        table_name_to_sql(&self.schema, &self.table, sql);
        sql.append_syntax(" AS ");
        self.alias.to_sql(sql);

        sql.append_syntax(" SET ");
        for (index, (column, value)) in self.set.iter().enumerate() {
            column.to_sql(sql);
            sql.append_syntax(" = ");
            value.to_sql(sql);
            if index < (self.set.len() - 1) {
                sql.append_syntax(", ");
            }
        }

        self.where_.to_sql(sql);
        self.returning.to_sql(sql);
    }
}

impl Delete {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("DELETE FROM ");
        table_name_to_sql(&self.schema, &self.table, sql);
        sql.append_syntax(" AS ");
        self.alias.to_sql(sql);

        self.where_.to_sql(sql);
        self.returning.to_sql(sql);
    }
}

impl Returning {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Returning(columns) = self;
        if columns.is_empty() {
            return;
        }
        sql.append_syntax(" RETURNING ");
        for (index, column) in columns.iter().enumerate() {
            column.to_sql(sql);
            if index < (columns.len() - 1) {
                sql.append_syntax(", ");
            }
        }
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("FROM ");
        match &self {
            From::Table { reference, alias } => {
                reference.to_sql(sql);
                sql.append_syntax(" AS ");
                alias.to_sql(sql);
            }
            From::Select { select, alias } => {
                sql.append_syntax("(");
                select.to_sql(sql);
                sql.append_syntax(")");
                sql.append_syntax(" AS ");
                alias.to_sql(sql);
            }
        }
    }
}

impl Join {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Join::LeftOuterJoin(LeftOuterJoin {
                reference,
                alias,
                on,
            }) => {
                sql.append_syntax("LEFT OUTER JOIN ");
                reference.to_sql(sql);
                sql.append_syntax(" AS ");
                alias.to_sql(sql);
                sql.append_syntax(" ON ");
                on.to_sql(sql);
            }
        }
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(expression) = self;
        if *expression != helpers::true_expr() {
            sql.append_syntax(" WHERE ");
            expression.to_sql(sql);
        }
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut SQL) {
        if self.elements.is_empty() {
            return;
        }
        sql.append_syntax(" ORDER BY ");
        for (index, element) in self.elements.iter().enumerate() {
            element.target.to_sql(sql);
            element.direction.to_sql(sql);
            if index < (self.elements.len() - 1) {
                sql.append_syntax(", ");
            }
        }
    }
}

impl OrderByDirection {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            OrderByDirection::Asc => sql.append_syntax(" ASC"),
            OrderByDirection::Desc => sql.append_syntax(" DESC"),
        }
    }
}

// scalars
impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Expression::ColumnReference(column_reference) => column_reference.to_sql(sql),
            Expression::Value(value) => value.to_sql(sql),
            Expression::And { left, right } => {
                sql.append_syntax("(");
                left.to_sql(sql);
                sql.append_syntax(" AND ");
                right.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::Not(expr) => {
                sql.append_syntax("NOT ");
                expr.to_sql(sql);
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                sql.append_syntax("(");
                left.to_sql(sql);
                operator.to_sql(sql);
                right.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::UnaryOperation {
                expression,
                operator,
            } => {
                sql.append_syntax("(");
                expression.to_sql(sql);
                operator.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::FunctionCall { function, args } => {
                function.to_sql(sql);
                sql.append_syntax("(");
                for (index, arg) in args.iter().enumerate() {
                    arg.to_sql(sql);
                    if index < (args.len() - 1) {
                        sql.append_syntax(", ");
                    }
                }
                sql.append_syntax(")");
            }
            Expression::Case {
                condition,
                then,
                otherwise,
            } => {
                sql.append_syntax("CASE WHEN ");
                condition.to_sql(sql);
                sql.append_syntax(" THEN ");
                then.to_sql(sql);
                sql.append_syntax(" ELSE ");
                otherwise.to_sql(sql);
                sql.append_syntax(" END");
            }
            Expression::JsonBuildObject(entries) => {
                sql.append_syntax("json_build_object(");
                for (index, (key, value)) in entries.iter().enumerate() {
                    sql.append_string_literal(key);
                    sql.append_syntax(", ");
                    value.to_sql(sql);
                    if index < (entries.len() - 1) {
                        sql.append_syntax(", ");
                    }
                }
                sql.append_syntax(")");
            }
            Expression::RowToJson(reference) => {
                sql.append_syntax("row_to_json(");
                reference.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::Cast { expression, r#type } => {
                sql.append_syntax("CAST(");
                expression.to_sql(sql);
                sql.append_syntax(" AS ");
                r#type.to_sql(sql);
                sql.append_syntax(")");
            }
        }
    }
}

impl UnaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            UnaryOperator::IsNull => sql.append_syntax(" IS NULL"),
            UnaryOperator::IsNotNull => sql.append_syntax(" IS NOT NULL"),
            UnaryOperator::IsTrue => sql.append_syntax(" IS TRUE"),
            UnaryOperator::IsFalse => sql.append_syntax(" IS FALSE"),
        }
    }
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            BinaryOperator::Equals => sql.append_syntax(" = "),
            BinaryOperator::NotEquals => sql.append_syntax(" != "),
            BinaryOperator::GreaterThanOrEqualTo => sql.append_syntax(" >= "),
            BinaryOperator::LessThanOrEqualTo => sql.append_syntax(" <= "),
        }
    }
}

impl Function {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Function::Coalesce => sql.append_syntax("coalesce"),
            Function::JsonAgg => sql.append_syntax("json_agg"),
        }
    }
}

impl ScalarType {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            ScalarType::Boolean => sql.append_syntax("boolean"),
            ScalarType::Integer => sql.append_syntax("integer"),
            ScalarType::Bigint => sql.append_syntax("bigint"),
            ScalarType::Numeric => sql.append_syntax("numeric"),
            ScalarType::Text => sql.append_syntax("text"),
            ScalarType::Jsonb => sql.append_syntax("jsonb"),
            ScalarType::Date => sql.append_syntax("date"),
            ScalarType::TimestampWithTimeZone => sql.append_syntax("timestamp with time zone"),
            ScalarType::Uuid => sql.append_syntax("uuid"),
        }
    }
}

impl Value {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Value::Parameter(param) => sql.append_param(param.clone()),
            Value::String(s) => sql.append_string_literal(s),
            Value::Bool(true) => sql.append_syntax("true"),
            Value::Bool(false) => sql.append_syntax("false"),
            Value::Null => sql.append_syntax("NULL"),
        }
    }
}

// names
fn table_name_to_sql(schema: &SchemaName, table: &TableName, sql: &mut SQL) {
    schema.to_sql(sql);
    sql.append_syntax(".");
    table.to_sql(sql);
}

impl TableReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            TableReference::DBTable { schema, table } => table_name_to_sql(schema, table, sql),
            TableReference::AliasedTable(alias) => alias.to_sql(sql),
        };
    }
}

impl SchemaName {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}

impl TableName {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}

impl TableAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.name);
    }
}

impl ColumnReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            ColumnReference::TableColumn { table, name } => {
                table.to_sql(sql);
                sql.append_syntax(".");
                name.to_sql(sql);
            }
        };
    }
}

impl ColumnAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.name);
    }
}
