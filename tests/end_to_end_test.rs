//! Gateway, task service and dictionary service wired together.

mod common;

use axum::http::StatusCode;
use common::{client, start_dict_service, start_gateway, start_task_service, TestResult};
use serde_json::{json, Value};

#[tokio::test]
async fn test_task_lifecycle_through_gateway() -> TestResult {
    let (tasks, broker) = start_task_service().await;
    let dict = start_dict_service().await;
    let gateway = start_gateway(dict.base_url.clone(), tasks.url("/tasks")).await;

    let response = client()
        .post(gateway.url("/tasks/"))
        .json(&json!({"title": "T", "description": "D"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let task: Value = response.json().await?;
    let id = task["id"].as_str().unwrap_or_default().to_string();

    let events = broker.published_on("tasks");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event_type"], "task_created");
    assert_eq!(events[0]["data"]["title"], "T");

    let fetched: Value = client()
        .get(gateway.url(&format!("/tasks/{id}")))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched, task);

    let complete = client()
        .put(gateway.url(&format!("/tasks/{id}/complete")))
        .send()
        .await?;
    assert_eq!(complete.status(), StatusCode::OK);

    let completed: Vec<Value> = client()
        .get(gateway.url("/tasks/?status=completed"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["id"], json!(id));

    let missing = client().get(gateway.url("/tasks/unknown")).send().await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await?;
    assert_eq!(body["detail"], "Task not found");

    gateway.shutdown().await;
    dict.shutdown().await;
    tasks.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_dictionary_through_gateway() -> TestResult {
    let (tasks, _broker) = start_task_service().await;
    let dict = start_dict_service().await;
    let gateway = start_gateway(dict.base_url.clone(), tasks.url("/tasks")).await;

    let created: Value = client()
        .post(gateway.url("/dict/items/"))
        .body(r#"{"name":"apple"}"#)
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let fetched: Value = client()
        .get(gateway.url(&format!("/dict/items/{id}")))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched["name"], "apple");

    let listed: Vec<Value> = client()
        .get(gateway.url("/dict/items/"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(listed.len(), 1);

    gateway.shutdown().await;
    dict.shutdown().await;
    tasks.shutdown().await;
    Ok(())
}
