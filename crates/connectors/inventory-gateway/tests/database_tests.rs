//! Scenarios against a live PostgreSQL database.
//!
//! Run with `cargo test -- --ignored` and a database at `INVENTORY_TEST_DATABASE_URL`.

use axum::http::{Method, StatusCode};
use serde_json::json;
use similar_asserts::assert_eq;

use inventory_gateway::auth::hash_password;
use tests_common::database::unique_name;
use tests_common::request::{get, send};
use tests_common::router::create_database_router;

#[tokio::test]
#[ignore]
async fn inserted_products_can_be_read_back_by_id() {
    let router = create_database_router().await.unwrap();
    let name = unique_name("Widget");

    let (status, product) = send(
        &router,
        Method::POST,
        "/api/products",
        Some(json!({ "name": name, "sale_price": 9.99 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["name"], json!(name));
    assert!(product["id"].is_string());
    assert!(product["created_at"].is_string());

    let id = product["id"].as_str().unwrap();
    let (status, rows) = get(&router, &format!("/api/products?id=eq.{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows, json!([product]));
}

#[tokio::test]
#[ignore]
async fn multi_row_inserts_keep_input_order() {
    let router = create_database_router().await.unwrap();
    let names = [unique_name("first"), unique_name("second")];

    let (status, rows) = send(
        &router,
        Method::POST,
        "/api/categories",
        Some(json!([{ "name": names[0] }, { "name": names[1] }])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let returned = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(returned, names.to_vec());
}

#[tokio::test]
#[ignore]
async fn a_failing_row_rolls_back_the_whole_insert() {
    let router = create_database_router().await.unwrap();
    let name = unique_name("rolled-back");

    // the second row violates the NOT NULL constraint on name
    let (status, _) = send(
        &router,
        Method::POST,
        "/api/categories",
        Some(json!([{ "name": name }, { "description": "no name" }])),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, rows) = get(&router, &format!("/api/categories?name=eq.{name}")).await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
#[ignore]
async fn embedded_relations_are_objects_or_null() {
    let router = create_database_router().await.unwrap();

    let (_, category) = send(
        &router,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": unique_name("Tools") })),
    )
    .await;
    let (_, with_category) = send(
        &router,
        Method::POST,
        "/api/products",
        Some(json!({ "name": unique_name("Hammer"), "category_id": category["id"] })),
    )
    .await;
    let (_, without_category) = send(
        &router,
        Method::POST,
        "/api/products",
        Some(json!({ "name": unique_name("Loose nail") })),
    )
    .await;

    let (status, rows) = get(
        &router,
        &format!(
            "/api/products?select=id,categories(id,name)&id=eq.{}",
            with_category["id"].as_str().unwrap()
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rows,
        json!([{
            "id": with_category["id"],
            "categories": { "id": category["id"], "name": category["name"] }
        }])
    );

    let (_, rows) = get(
        &router,
        &format!(
            "/api/products?select=id,categories(id,name)&id=eq.{}",
            without_category["id"].as_str().unwrap()
        ),
    )
    .await;
    assert_eq!(
        rows,
        json!([{ "id": without_category["id"], "categories": null }])
    );
}

#[tokio::test]
#[ignore]
async fn ordered_reads_are_repeatable() {
    let router = create_database_router().await.unwrap();

    let (_, first) = get(&router, "/api/products?select=id,name&order=name.asc,id.desc").await;
    let (_, second) = get(&router, "/api/products?select=id,name&order=name.asc,id.desc").await;

    assert_eq!(first, second);
}

#[tokio::test]
#[ignore]
async fn updates_without_matches_return_an_empty_array() {
    let router = create_database_router().await.unwrap();

    let (status, rows) = send(
        &router,
        Method::PATCH,
        "/api/products?id=eq.00000000-0000-0000-0000-000000000000",
        Some(json!({ "current_stock": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows, json!([]));
}

#[tokio::test]
#[ignore]
async fn stock_movements_update_current_stock() {
    let router = create_database_router().await.unwrap();

    let (_, product) = send(
        &router,
        Method::POST,
        "/api/products",
        Some(json!({ "name": unique_name("Bolt"), "current_stock": 10 })),
    )
    .await;
    let (status, _) = send(
        &router,
        Method::POST,
        "/api/stock_movements",
        Some(json!({ "product_id": product["id"], "movement_type": "out", "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = product["id"].as_str().unwrap();
    let (_, rows) = get(&router, &format!("/api/products?select=current_stock&id=eq.{id}")).await;
    assert_eq!(rows, json!([{ "current_stock": 7 }]));

    let (status, rows) = send(
        &router,
        Method::DELETE,
        &format!("/api/products?id=eq.{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn login_checks_the_password_hash() {
    let router = create_database_router().await.unwrap();
    let username = unique_name("clerk");

    let (status, user) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(json!({ "username": username, "password_hash": hash_password("s3cret") })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("password_hash").is_none());

    let (status, session) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "username": username, "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["session"]["user_id"], user["id"]);
    assert_eq!(session["user"], user);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "username": username, "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "invalid username or password" }));
}

#[tokio::test]
#[ignore]
async fn health_reports_ok() {
    let router = create_database_router().await.unwrap();

    let (status, body) = get(&router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
#[ignore]
async fn jsonb_values_are_stored_as_written() {
    let router = create_database_router().await.unwrap();

    for details in [json!("login"), json!("[1,2]"), json!({ "before": 1 })] {
        let (status, row) = send(
            &router,
            Method::POST,
            "/api/audit_logs",
            Some(json!({ "action": unique_name("audit"), "details": details })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(row["details"], details);

        let id = row["id"].as_str().unwrap();
        let (_, rows) = get(&router, &format!("/api/audit_logs?select=details&id=eq.{id}")).await;
        assert_eq!(rows, json!([{ "details": details }]));
    }
}
