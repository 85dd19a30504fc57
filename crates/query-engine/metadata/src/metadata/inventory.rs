//! The compiled-in catalog of the inventory database.
//!
//! Table names, column names and relationships listed here form the allow-list that
//! every identifier in a request is checked against before it is written into SQL.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::database::{ColumnInfo, Exposure, Relationship, ScalarType, TableInfo, TablesInfo};
use super::Metadata;

const SCHEMA: &str = "public";

impl Metadata {
    /// The catalog for products, categories, suppliers, stock movements, users and audit logs.
    pub fn inventory() -> Self {
        use ScalarType::{Integer, Jsonb, Numeric, Text, TimestampWithTimeZone as Timestamp, Uuid};

        let tables = [
            table(
                "categories",
                &[
                    ("id", Uuid),
                    ("name", Text),
                    ("description", Text),
                    ("created_at", Timestamp),
                    ("updated_at", Timestamp),
                ],
                &[],
            ),
            table(
                "suppliers",
                &[
                    ("id", Uuid),
                    ("name", Text),
                    ("contact_name", Text),
                    ("email", Text),
                    ("phone", Text),
                    ("address", Text),
                    ("created_at", Timestamp),
                    ("updated_at", Timestamp),
                ],
                &[],
            ),
            table(
                "products",
                &[
                    ("id", Uuid),
                    ("name", Text),
                    ("sku", Text),
                    ("description", Text),
                    ("category_id", Uuid),
                    ("supplier_id", Uuid),
                    ("purchase_price", Numeric),
                    ("sale_price", Numeric),
                    ("current_stock", Integer),
                    ("min_stock", Integer),
                    ("unit", Text),
                    ("image_url", Text),
                    ("created_at", Timestamp),
                    ("updated_at", Timestamp),
                ],
                &[
                    ("categories", "category_id", "categories"),
                    ("suppliers", "supplier_id", "suppliers"),
                ],
            ),
            table(
                "stock_movements",
                &[
                    ("id", Uuid),
                    ("product_id", Uuid),
                    ("user_id", Uuid),
                    ("movement_type", Text),
                    ("quantity", Integer),
                    ("notes", Text),
                    ("created_at", Timestamp),
                ],
                &[
                    ("products", "product_id", "products"),
                    ("users", "user_id", "users"),
                ],
            ),
            write_only(
                table(
                    "users",
                    &[
                        ("id", Uuid),
                        ("username", Text),
                        ("password_hash", Text),
                        ("full_name", Text),
                        ("email", Text),
                        ("role", Text),
                        ("created_at", Timestamp),
                        ("updated_at", Timestamp),
                    ],
                    &[],
                ),
                &["password_hash"],
            ),
            table(
                "audit_logs",
                &[
                    ("id", Uuid),
                    ("user_id", Uuid),
                    ("action", Text),
                    ("table_name", Text),
                    ("record_id", Text),
                    ("details", Jsonb),
                    ("created_at", Timestamp),
                ],
                &[("users", "user_id", "users")],
            ),
        ];

        Metadata {
            tables: TablesInfo(
                tables
                    .into_iter()
                    .map(|info| (info.table_name.clone(), info))
                    .collect(),
            ),
        }
    }
}

/// Build a table entry. Relationships are `(name, foreign key column, target table)` and
/// always point at the target's `id`.
fn table(
    name: &str,
    columns: &[(&str, ScalarType)],
    relationships: &[(&str, &str, &str)],
) -> TableInfo {
    TableInfo {
        schema_name: SCHEMA.to_string(),
        table_name: name.to_string(),
        columns: columns
            .iter()
            .map(|(column, scalar_type)| {
                (
                    (*column).to_string(),
                    ColumnInfo {
                        name: (*column).to_string(),
                        r#type: *scalar_type,
                        exposure: Exposure::ReadWrite,
                    },
                )
            })
            .collect::<IndexMap<_, _>>(),
        relationships: relationships
            .iter()
            .map(|(relationship, foreign_key_column, target_table)| {
                (
                    (*relationship).to_string(),
                    Relationship {
                        foreign_key_column: (*foreign_key_column).to_string(),
                        target_table: (*target_table).to_string(),
                        target_column: "id".to_string(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

fn write_only(mut info: TableInfo, columns: &[&str]) -> TableInfo {
    for column in columns {
        if let Some(column) = info.columns.get_mut(*column) {
            column.exposure = Exposure::WriteOnly;
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_contains_exactly_the_inventory_tables() {
        let metadata = Metadata::inventory();
        let names = metadata.tables.0.keys().cloned().collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                "audit_logs",
                "categories",
                "products",
                "stock_movements",
                "suppliers",
                "users",
            ]
        );
    }

    #[test]
    fn every_relationship_points_at_a_known_table_and_column() {
        let metadata = Metadata::inventory();

        for info in metadata.tables.0.values() {
            for (name, relationship) in &info.relationships {
                assert!(
                    info.writable_column(&relationship.foreign_key_column).is_some(),
                    "{}.{name} uses an unknown foreign key column",
                    info.table_name
                );
                let target = metadata
                    .tables
                    .get(&relationship.target_table)
                    .unwrap_or_else(|| panic!("{}.{name} targets an unknown table", info.table_name));
                assert!(target.readable_column(&relationship.target_column).is_some());
            }
        }
    }

    #[test]
    fn password_hash_is_write_only() {
        let metadata = Metadata::inventory();
        let users = metadata.tables.get("users").unwrap();

        assert!(users.readable_column("password_hash").is_none());
        assert!(users.writable_column("password_hash").is_some());
        assert!(users
            .readable_columns()
            .all(|column| column.name != "password_hash"));
    }
}
