//! Dictionary service HTTP API.

mod common;

use axum::http::StatusCode;
use common::{client, start_dict_service, TestResult};
use serde_json::{json, Value};

#[tokio::test]
async fn test_item_crud() -> TestResult {
    let server = start_dict_service().await;

    let created: Value = client()
        .post(server.url("/items/"))
        .json(&json!({"id": "client-chosen", "name": "apple", "description": "fruit"}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert_ne!(id, "client-chosen");
    assert_eq!(created["name"], "apple");

    let listed: Vec<Value> = client().get(server.url("/items")).send().await?.json().await?;
    assert_eq!(listed, vec![created.clone()]);

    let updated: Value = client()
        .put(server.url(&format!("/items/{id}")))
        .json(&json!({"description": "red fruit"}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["name"], "apple");
    assert_eq!(updated["description"], "red fruit");

    let fetched: Value = client()
        .get(server.url(&format!("/items/{id}")))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched, updated);

    let deleted: Value = client()
        .delete(server.url(&format!("/items/{id}")))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(deleted, json!({"message": "Item deleted"}));

    let missing = client().get(server.url(&format!("/items/{id}"))).send().await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await?;
    assert_eq!(body["detail"], "Item not found");

    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_health_counts_items() -> TestResult {
    let server = start_dict_service().await;

    client()
        .post(server.url("/items/"))
        .json(&json!({"name": "pear"}))
        .send()
        .await?;

    let health: Value = client().get(server.url("/health")).send().await?.json().await?;
    assert_eq!(
        health,
        json!({"status": "healthy", "service": "dict-service", "total_items": 1})
    );

    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_missing_name_is_422() -> TestResult {
    let server = start_dict_service().await;

    let response = client()
        .post(server.url("/items/"))
        .json(&json!({"description": "nameless"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    server.shutdown().await;
    Ok(())
}
