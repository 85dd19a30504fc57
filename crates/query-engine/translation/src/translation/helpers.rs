//! Lookups against the catalog, shared by the query and mutation translations.

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use super::error::Error;

/// Static information from the catalog.
#[derive(Debug)]
pub struct Env<'a> {
    pub metadata: &'a metadata::Metadata,
}

impl<'a> Env<'a> {
    pub fn new(metadata: &'a metadata::Metadata) -> Self {
        Env { metadata }
    }

    /// Lookup a table in the allow-list.
    pub fn lookup_table(&self, table_name: &str) -> Result<&'a metadata::TableInfo, Error> {
        self.metadata
            .tables
            .get(table_name)
            .ok_or_else(|| Error::UnknownTable(table_name.to_string()))
    }

    /// Lookup the target of a relationship declared on `table`.
    pub fn lookup_relationship(
        &self,
        table: &'a metadata::TableInfo,
        relationship_name: &str,
    ) -> Result<(&'a metadata::Relationship, &'a metadata::TableInfo), Error> {
        let relationship = table.relationship(relationship_name).ok_or_else(|| {
            Error::UnknownRelationship {
                table: table.table_name.clone(),
                relationship: relationship_name.to_string(),
            }
        })?;
        let target = self.lookup_table(&relationship.target_table)?;
        Ok((relationship, target))
    }
}

/// A table, together with the alias it is referred to by in the generated SQL.
#[derive(Debug, Clone)]
pub struct TableNameAndReference<'a> {
    pub info: &'a metadata::TableInfo,
    pub reference: sql::ast::TableReference,
}

impl<'a> TableNameAndReference<'a> {
    /// Refer to a table by an alias of the given name.
    pub fn aliased(info: &'a metadata::TableInfo, alias: &str) -> Self {
        TableNameAndReference {
            info,
            reference: sql::ast::TableReference::AliasedTable(sql::helpers::make_table_alias(
                alias.to_string(),
            )),
        }
    }

    pub fn db_table(&self) -> sql::ast::TableReference {
        sql::helpers::make_db_table_reference(&self.info.schema_name, &self.info.table_name)
    }

    pub fn alias(&self) -> sql::ast::TableAlias {
        match &self.reference {
            sql::ast::TableReference::AliasedTable(alias) => alias.clone(),
            sql::ast::TableReference::DBTable { table, .. } => {
                sql::helpers::make_table_alias(table.0.clone())
            }
        }
    }

    /// A column that may be read: projected, filtered on or ordered by.
    pub fn lookup_readable_column(&self, column: &str) -> Result<&'a metadata::ColumnInfo, Error> {
        self.info
            .readable_column(column)
            .ok_or_else(|| self.unknown_column(column))
    }

    /// A column that may be written, including write-only ones.
    pub fn lookup_writable_column(&self, column: &str) -> Result<&'a metadata::ColumnInfo, Error> {
        self.info
            .writable_column(column)
            .ok_or_else(|| self.unknown_column(column))
    }

    /// `"alias"."column"`
    pub fn column_expression(&self, column: &metadata::ColumnInfo) -> sql::ast::Expression {
        sql::helpers::make_column(
            self.reference.clone(),
            sql::ast::ColumnName(column.name.clone()),
        )
    }

    /// The RETURNING list of a mutation: every readable column in declaration order.
    pub fn returning(&self) -> sql::ast::Returning {
        sql::ast::Returning(
            self.info
                .readable_columns()
                .map(|column| sql::ast::ColumnName(column.name.clone()))
                .collect(),
        )
    }

    fn unknown_column(&self, column: &str) -> Error {
        Error::UnknownColumn {
            table: self.info.table_name.clone(),
            column: column.to_string(),
        }
    }
}
