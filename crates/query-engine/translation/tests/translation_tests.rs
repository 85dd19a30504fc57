mod common;

use serde_json::json;

use common::{text, translate_read, translate_write};
use query_engine_sql::sql::execution_plan::MutationReturns;
use query_engine_sql::sql::string::Param;
use query_engine_translation::translation::error::{Error, MutationKind};

mod read {
    use super::*;

    #[test]
    fn select_all_columns_by_default() {
        let sql = translate_read("categories", "").unwrap();

        similar_asserts::assert_eq!(
            sql.sql,
            r#"SELECT coalesce(json_agg(row_to_json("_rows")), '[]') AS "rows" FROM (SELECT "categories"."id" AS "id", "categories"."name" AS "name", "categories"."description" AS "description", "categories"."created_at" AS "created_at", "categories"."updated_at" AS "updated_at" FROM "public"."categories" AS "categories") AS "_rows""#
        );
        assert!(sql.params.is_empty());
    }

    #[test]
    fn low_stock_products_with_their_category() {
        let sql = translate_read(
            "products",
            "select=id,name,categories(id,name)&current_stock=lte.5&order=name.desc",
        )
        .unwrap();

        similar_asserts::assert_eq!(
            sql.sql,
            r#"SELECT coalesce(json_agg(row_to_json("_rows")), '[]') AS "rows" FROM (SELECT "products"."id" AS "id", "products"."name" AS "name", CASE WHEN ("categories"."id" IS NULL) THEN NULL ELSE json_build_object('id', "categories"."id", 'name', "categories"."name") END AS "categories" FROM "public"."products" AS "products" LEFT OUTER JOIN "public"."categories" AS "categories" ON ("products"."category_id" = "categories"."id") WHERE ("products"."current_stock" <= CAST($1 AS integer)) ORDER BY "products"."name" DESC) AS "_rows""#
        );
        assert_eq!(sql.params, vec![text("5")]);
    }

    #[test]
    fn filters_are_anded_in_query_string_order() {
        let sql = translate_read(
            "products",
            "select=id&supplier_id=not.is.null&sku=not.eq.A-1&name=is.null",
        )
        .unwrap();

        similar_asserts::assert_eq!(
            sql.sql,
            r#"SELECT coalesce(json_agg(row_to_json("_rows")), '[]') AS "rows" FROM (SELECT "products"."id" AS "id" FROM "public"."products" AS "products" WHERE ((("products"."supplier_id" IS NOT NULL) AND NOT ("products"."sku" = CAST($1 AS text))) AND ("products"."name" IS NULL))) AS "_rows""#
        );
        assert_eq!(sql.params, vec![text("A-1")]);
    }

    #[test]
    fn unknown_operators_are_part_of_the_value() {
        let sql = translate_read("suppliers", "select=id&email=like.a%25&name=neq.Acme").unwrap();

        similar_asserts::assert_eq!(
            sql.sql,
            r#"SELECT coalesce(json_agg(row_to_json("_rows")), '[]') AS "rows" FROM (SELECT "suppliers"."id" AS "id" FROM "public"."suppliers" AS "suppliers" WHERE (("suppliers"."email" = CAST($1 AS text)) AND ("suppliers"."name" != CAST($2 AS text)))) AS "_rows""#
        );
        assert_eq!(sql.params, vec![text("like.a%"), text("Acme")]);
    }

    #[test]
    fn movements_embed_products_and_users() {
        let sql = translate_read(
            "stock_movements",
            "select=quantity,products(name),users(username,full_name)&order=created_at.desc,quantity",
        )
        .unwrap();

        similar_asserts::assert_eq!(
            sql.sql,
            r#"SELECT coalesce(json_agg(row_to_json("_rows")), '[]') AS "rows" FROM (SELECT "stock_movements"."quantity" AS "quantity", CASE WHEN ("products"."id" IS NULL) THEN NULL ELSE json_build_object('name', "products"."name") END AS "products", CASE WHEN ("users"."id" IS NULL) THEN NULL ELSE json_build_object('username', "users"."username", 'full_name', "users"."full_name") END AS "users" FROM "public"."stock_movements" AS "stock_movements" LEFT OUTER JOIN "public"."products" AS "products" ON ("stock_movements"."product_id" = "products"."id") LEFT OUTER JOIN "public"."users" AS "users" ON ("stock_movements"."user_id" = "users"."id") ORDER BY "stock_movements"."created_at" DESC, "stock_movements"."quantity" ASC) AS "_rows""#
        );
    }

    #[test]
    fn star_never_includes_password_hash() {
        let sql = translate_read("users", "select=*").unwrap();

        assert!(!sql.sql.contains("password_hash"));
        assert!(sql.sql.contains(r#""users"."full_name" AS "full_name""#));
    }

    #[test]
    fn duplicate_fields_are_projected_once() {
        let sql = translate_read("categories", "select=name,*,name").unwrap();

        similar_asserts::assert_eq!(
            sql.sql,
            r#"SELECT coalesce(json_agg(row_to_json("_rows")), '[]') AS "rows" FROM (SELECT "categories"."name" AS "name", "categories"."id" AS "id", "categories"."description" AS "description", "categories"."created_at" AS "created_at", "categories"."updated_at" AS "updated_at" FROM "public"."categories" AS "categories") AS "_rows""#
        );
    }
}

mod write {
    use super::*;

    #[test]
    fn insert_single_object_returns_first_row() {
        let (statements, returns) = translate_write(
            "POST",
            "products",
            "",
            &json!({"sale_price": 9.99, "name": "Widget"}),
        )
        .unwrap();

        assert_eq!(returns, MutationReturns::FirstRow);
        assert_eq!(statements.len(), 1);
        similar_asserts::assert_eq!(
            statements[0].sql,
            r#"WITH "_mutation" AS (INSERT INTO "public"."products" ("name", "sale_price") VALUES (CAST($1 AS text), CAST($2 AS numeric)) RETURNING "id", "name", "sku", "description", "category_id", "supplier_id", "purchase_price", "sale_price", "current_stock", "min_stock", "unit", "image_url", "created_at", "updated_at") SELECT coalesce(json_agg(row_to_json("_mutation")), '[]') AS "rows" FROM "_mutation" AS "_mutation""#
        );
        assert_eq!(statements[0].params, vec![text("Widget"), text("9.99")]);
    }

    #[test]
    fn insert_array_is_one_statement_per_row() {
        let (statements, returns) = translate_write(
            "POST",
            "categories",
            "",
            &json!([{"name": "Tools"}, {"name": "Paint", "description": null}]),
        )
        .unwrap();

        assert_eq!(returns, MutationReturns::AllRows);
        assert_eq!(statements.len(), 2);
        similar_asserts::assert_eq!(
            statements[1].sql,
            r#"WITH "_mutation" AS (INSERT INTO "public"."categories" ("name", "description") VALUES (CAST($1 AS text), CAST($2 AS text)) RETURNING "id", "name", "description", "created_at", "updated_at") SELECT coalesce(json_agg(row_to_json("_mutation")), '[]') AS "rows" FROM "_mutation" AS "_mutation""#
        );
        assert_eq!(statements[0].params, vec![text("Tools")]);
        assert_eq!(statements[1].params, vec![text("Paint"), Param::Null]);
    }

    #[test]
    fn insert_may_set_write_only_columns_but_never_returns_them() {
        let (statements, _) = translate_write(
            "POST",
            "users",
            "",
            &json!({"username": "ana", "password_hash": "abc"}),
        )
        .unwrap();

        similar_asserts::assert_eq!(
            statements[0].sql,
            r#"WITH "_mutation" AS (INSERT INTO "public"."users" ("username", "password_hash") VALUES (CAST($1 AS text), CAST($2 AS text)) RETURNING "id", "username", "full_name", "email", "role", "created_at", "updated_at") SELECT coalesce(json_agg(row_to_json("_mutation")), '[]') AS "rows" FROM "_mutation" AS "_mutation""#
        );
    }

    #[test]
    fn update_sets_body_columns_where_filters_match() {
        let (statements, returns) = translate_write(
            "PATCH",
            "products",
            "id=eq.7b0e4b4e-3c1a-4a53-9a8e-0d2b7c1b2a11",
            &json!({"current_stock": 5}),
        )
        .unwrap();

        assert_eq!(returns, MutationReturns::AllRows);
        similar_asserts::assert_eq!(
            statements[0].sql,
            r#"WITH "_mutation" AS (UPDATE "public"."products" AS "products" SET "current_stock" = CAST($1 AS integer) WHERE ("products"."id" = CAST($2 AS uuid)) RETURNING "id", "name", "sku", "description", "category_id", "supplier_id", "purchase_price", "sale_price", "current_stock", "min_stock", "unit", "image_url", "created_at", "updated_at") SELECT coalesce(json_agg(row_to_json("_mutation")), '[]') AS "rows" FROM "_mutation" AS "_mutation""#
        );
        assert_eq!(
            statements[0].params,
            vec![text("5"), text("7b0e4b4e-3c1a-4a53-9a8e-0d2b7c1b2a11")]
        );
    }

    #[test]
    fn delete_returns_deleted_rows() {
        let (statements, returns) =
            translate_write("DELETE", "stock_movements", "quantity=gte.100", &json!(null)).unwrap();

        assert_eq!(returns, MutationReturns::AllRows);
        similar_asserts::assert_eq!(
            statements[0].sql,
            r#"WITH "_mutation" AS (DELETE FROM "public"."stock_movements" AS "stock_movements" WHERE ("stock_movements"."quantity" >= CAST($1 AS integer)) RETURNING "id", "product_id", "user_id", "movement_type", "quantity", "notes", "created_at") SELECT coalesce(json_agg(row_to_json("_mutation")), '[]') AS "rows" FROM "_mutation" AS "_mutation""#
        );
    }
}

mod validation {
    use super::*;

    #[test]
    fn tables_outside_the_allow_list_are_rejected() {
        for table in ["drop_table_students;--", "pg_user", "Products", "products\""] {
            assert_eq!(
                translate_read(table, "").unwrap_err(),
                Error::UnknownTable(table.to_string())
            );
            assert_eq!(
                translate_write("POST", table, "", &json!({})).unwrap_err(),
                Error::UnknownTable(table.to_string())
            );
        }
    }

    #[test]
    fn columns_outside_the_allow_list_are_rejected() {
        let unknown = |column: &str| Error::UnknownColumn {
            table: "products".to_string(),
            column: column.to_string(),
        };

        assert_eq!(
            translate_read("products", "select=id,\"name\";drop").unwrap_err(),
            unknown("\"name\";drop")
        );
        assert_eq!(
            translate_read("products", "colour=eq.red").unwrap_err(),
            unknown("colour")
        );
        assert_eq!(
            translate_read("products", "order=price.desc").unwrap_err(),
            unknown("price")
        );
        assert_eq!(
            translate_write("POST", "products", "", &json!({"price": 1})).unwrap_err(),
            unknown("price")
        );
        assert_eq!(
            translate_read("users", "password_hash=eq.x").unwrap_err(),
            Error::UnknownColumn {
                table: "users".to_string(),
                column: "password_hash".to_string(),
            }
        );
        assert_eq!(
            translate_read("stock_movements", "select=users(password_hash)").unwrap_err(),
            Error::UnknownColumn {
                table: "users".to_string(),
                column: "password_hash".to_string(),
            }
        );
    }

    #[test]
    fn undeclared_relations_are_rejected() {
        assert_eq!(
            translate_read("categories", "select=*,products(id)").unwrap_err(),
            Error::UnknownRelationship {
                table: "categories".to_string(),
                relationship: "products".to_string(),
            }
        );
    }

    #[test]
    fn writes_without_filters_are_rejected() {
        assert_eq!(
            translate_write("PATCH", "products", "", &json!({"current_stock": 5})).unwrap_err(),
            Error::MissingFilter(MutationKind::Update)
        );
        assert_eq!(
            translate_write("DELETE", "products", "select=id&order=name", &json!(null)).unwrap_err(),
            Error::MissingFilter(MutationKind::Delete)
        );
    }

    #[test]
    fn empty_or_invalid_bodies_are_rejected() {
        assert_eq!(
            translate_write("PATCH", "products", "id=eq.1", &json!({})).unwrap_err(),
            Error::MissingBody(MutationKind::Update)
        );
        assert_eq!(
            translate_write("POST", "products", "", &json!([])).unwrap_err(),
            Error::MissingBody(MutationKind::Insert)
        );
        assert!(matches!(
            translate_write("POST", "products", "", &json!([{"name": "a"}, 3])).unwrap_err(),
            Error::InvalidBody(_)
        ));
        assert!(matches!(
            translate_write("POST", "products", "", &json!("Widget")).unwrap_err(),
            Error::InvalidBody(_)
        ));
        assert!(matches!(
            translate_write("PATCH", "products", "id=eq.1", &json!([{"name": "a"}])).unwrap_err(),
            Error::InvalidBody(_)
        ));
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        assert!(matches!(
            translate_read("products", "select=categories(id").unwrap_err(),
            Error::MalformedSelect(_)
        ));
        assert_eq!(
            translate_read("products", "order=name.up").unwrap_err(),
            Error::InvalidOrderDirection {
                column: "name".to_string(),
                direction: "up".to_string(),
            }
        );
        assert_eq!(
            translate_read("products", "image_url=is.empty").unwrap_err(),
            Error::InvalidIsValue("empty".to_string())
        );
    }
}
