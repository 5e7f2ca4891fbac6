//! # Task Handlers
//!
//! HTTP handlers for task CRUD, status and completion.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::constants::services;
use crate::models::{NewTask, Task, TaskFilter, TaskStatusView, TaskUpdate};
use crate::web::extractors::JsonBody;
use crate::web::response_types::{ActionResponse, ApiResult};
use crate::web::state::TaskServiceState;

const DEBUG_TASK_LIMIT: usize = 5;

/// Create a task: POST /tasks/
pub async fn create_task(
    State(state): State<TaskServiceState>,
    JsonBody(request): JsonBody<NewTask>,
) -> ApiResult<Json<Task>> {
    let task = state.service.create(request).await?;
    info!(task_id = %task.id, "Task created via API");
    Ok(Json(task))
}

/// List tasks: GET /tasks/?status=&priority=
pub async fn list_tasks(
    State(state): State<TaskServiceState>,
    Query(filter): Query<TaskFilter>,
) -> Json<Vec<Task>> {
    Json(state.service.list(&filter))
}

/// Get a task: GET /tasks/{task_id}
pub async fn get_task(
    State(state): State<TaskServiceState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.service.get(&task_id)?))
}

/// Patch a task: PUT /tasks/{task_id}
pub async fn update_task(
    State(state): State<TaskServiceState>,
    Path(task_id): Path<String>,
    JsonBody(update): JsonBody<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.service.update(&task_id, update).await?))
}

/// Delete a task: DELETE /tasks/{task_id}
pub async fn delete_task(
    State(state): State<TaskServiceState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let task = state.service.delete(&task_id).await?;
    Ok(Json(ActionResponse::for_task("Task deleted", task.id)))
}

/// Status view: GET /tasks/{task_id}/status
pub async fn get_task_status(
    State(state): State<TaskServiceState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskStatusView>> {
    Ok(Json(state.service.get_status(&task_id)?))
}

/// Complete a task: PUT /tasks/{task_id}/complete
pub async fn complete_task(
    State(state): State<TaskServiceState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let task = state.service.complete(&task_id).await?;
    Ok(Json(ActionResponse::for_task(
        "Task marked as completed",
        task.id,
    )))
}

/// Store snapshot: GET /debug
pub async fn debug_info(State(state): State<TaskServiceState>) -> Json<Value> {
    Json(json!({
        "service": services::TASK_SERVICE,
        "kafka_topic": state.service.task_topic(),
        "total_tasks": state.service.total(),
        "tasks": state.service.recent(DEBUG_TASK_LIMIT),
    }))
}
