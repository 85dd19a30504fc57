//! Metadata information regarding the database and tracked information.

use std::collections::BTreeMap;

use enum_iterator::Sequence;
use indexmap::IndexMap;
use serde::Serialize;

/// The scalar types of the columns we know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Boolean,
    Integer,
    Bigint,
    Numeric,
    Text,
    Jsonb,
    Date,
    #[serde(rename = "timestamp with time zone")]
    TimestampWithTimeZone,
    Uuid,
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::TimestampWithTimeZone => write!(f, "timestamp with time zone"),
            _ => write!(f, "{}", format!("{self:?}").to_lowercase()),
        }
    }
}

/// Whether a column can be read back through the gateway.
///
/// Write-only columns (password hashes and the like) can be set on insert or update,
/// but are never projected, filtered on, ordered by or returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Exposure {
    #[default]
    ReadWrite,
    WriteOnly,
}

/// Information about a database column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub r#type: ScalarType,
    pub exposure: Exposure,
}

impl ColumnInfo {
    pub fn is_readable(&self) -> bool {
        self.exposure == Exposure::ReadWrite
    }
}

/// A many-to-one relationship declared from a table to a target table.
///
/// `source.foreign_key_column = target.target_column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub foreign_key_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// Information about a database table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub schema_name: String,
    pub table_name: String,
    /// Columns in declaration order. `*` expands in this order.
    pub columns: IndexMap<String, ColumnInfo>,
    pub relationships: BTreeMap<String, Relationship>,
}

impl TableInfo {
    /// Columns that can be projected and returned, in declaration order.
    pub fn readable_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.values().filter(|column| column.is_readable())
    }

    /// Look up a column that can be read (projected, filtered on, ordered by).
    pub fn readable_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.get(name).filter(|column| column.is_readable())
    }

    /// Look up any column, including write-only ones.
    pub fn writable_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.get(name)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }
}

/// Mapping from a table name to its information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TablesInfo(pub BTreeMap<String, TableInfo>);

impl TablesInfo {
    pub fn get(&self, table_name: &str) -> Option<&TableInfo> {
        self.0.get(table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_types_render_as_postgres_type_names() {
        let names = enum_iterator::all::<ScalarType>()
            .map(|scalar_type| scalar_type.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                "boolean",
                "integer",
                "bigint",
                "numeric",
                "text",
                "jsonb",
                "date",
                "timestamp with time zone",
                "uuid",
            ]
        );
    }
}
