//! Type definitions of a SQL AST representation.

use super::string::Param;

/// A WITH clause
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub common_table_expressions: Vec<CommonTableExpression>,
}

/// A single Common Table Expression
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub alias: TableAlias,
    pub select: CTExpr,
}

/// The 'body' side of a Common Table Expression
#[derive(Debug, Clone, PartialEq)]
pub enum CTExpr {
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

/// A SELECT clause
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub with: With,
    pub select_list: SelectList,
    pub from: Option<From>,
    pub joins: Vec<Join>,
    pub where_: Where,
    pub order_by: OrderBy,
}

/// An INSERT clause
///
/// No columns means `DEFAULT VALUES`.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub schema: SchemaName,
    pub table: TableName,
    pub columns: Vec<ColumnName>,
    pub values: Vec<Expression>,
    pub returning: Returning,
}

/// A DELETE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub schema: SchemaName,
    pub table: TableName,
    pub alias: TableAlias,
    pub where_: Where,
    pub returning: Returning,
}

/// An UPDATE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub schema: SchemaName,
    pub table: TableName,
    pub alias: TableAlias,
    pub set: Vec<(ColumnName, Expression)>,
    pub where_: Where,
    pub returning: Returning,
}

/// a RETURNING clause
#[derive(Debug, Clone, PartialEq)]
pub struct Returning(pub Vec<ColumnName>);

/// A select list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectList(pub Vec<(ColumnAlias, Expression)>);

/// A FROM clause
#[derive(Debug, Clone, PartialEq)]
pub enum From {
    /// Select from a table reference
    Table {
        reference: TableReference,
        alias: TableAlias,
    },
    /// Select from a subquery
    Select {
        select: Box<Select>,
        alias: TableAlias,
    },
}

/// A JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub enum Join {
    /// LEFT OUTER JOIN
    LeftOuterJoin(LeftOuterJoin),
}

/// A LEFT OUTER JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub struct LeftOuterJoin {
    pub reference: TableReference,
    pub alias: TableAlias,
    pub on: Expression,
}

/// A WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Expression);

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub target: Expression,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// A scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// AND clause
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// NOT clause
    Not(Box<Expression>),
    /// A binary operation on two scalar expressions
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// A unary operation on a scalar expression
    UnaryOperation {
        expression: Box<Expression>,
        operator: UnaryOperator,
    },
    /// A scalar function call
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// `CASE WHEN condition THEN then ELSE otherwise END`
    Case {
        condition: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
    /// `json_build_object('key', value, ...)`, keys kept in the given order
    JsonBuildObject(Vec<(String, Box<Expression>)>),
    /// `row_to_json(table)`
    RowToJson(TableReference),
    /// A CAST expression
    Cast {
        expression: Box<Expression>,
        r#type: ScalarType,
    },
    /// A reference to a column
    ColumnReference(ColumnReference),
    /// A value
    Value(Value),
}

/// An unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    IsNull,
    IsNotNull,
    IsTrue,
    IsFalse,
}

/// Represents the name of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

/// A database function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Coalesce,
    JsonAgg,
}

/// Scalar types we cast parameters to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Boolean,
    Integer,
    Bigint,
    Numeric,
    Text,
    Jsonb,
    Date,
    TimestampWithTimeZone,
    Uuid,
}

/// A value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Bound parameter
    Parameter(Param),
    /// String literal, written into the SQL text with quotes escaped
    String(String),
    /// Boolean literal
    Bool(bool),
    /// Null literal
    Null,
}

/// A database schema name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaName(pub String);

/// A database table name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(pub String);

/// A database table's column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnName(pub String);

/// A reference to a table. Used when we want to query it,
/// for example in a FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableReference {
    /// refers to a db table object name
    DBTable {
        schema: SchemaName,
        table: TableName,
    },
    /// refers to an alias we created
    AliasedTable(TableAlias),
}

/// A reference to a column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnReference {
    /// refers to a db column object name
    TableColumn {
        table: TableReference,
        name: ColumnName,
    },
}

/// aliases that we give to relations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAlias {
    pub name: String,
}

/// aliases that we give to columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAlias {
    pub name: String,
}
