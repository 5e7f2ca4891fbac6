//! # Dictionary Item Handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::error::TaskhubError;
use crate::models::{Item, ItemUpdate, NewItem};
use crate::web::extractors::JsonBody;
use crate::web::response_types::{ActionResponse, ApiResult};
use crate::web::state::DictServiceState;

pub async fn create_item(
    State(state): State<DictServiceState>,
    JsonBody(request): JsonBody<NewItem>,
) -> Json<Item> {
    Json(state.items.insert(Item::new(request)))
}

pub async fn list_items(State(state): State<DictServiceState>) -> Json<Vec<Item>> {
    Json(state.items.list())
}

pub async fn get_item(
    State(state): State<DictServiceState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<Item>> {
    let item = state
        .items
        .get(&item_id)
        .ok_or_else(|| TaskhubError::item_not_found(&item_id))?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<DictServiceState>,
    Path(item_id): Path<String>,
    JsonBody(update): JsonBody<ItemUpdate>,
) -> ApiResult<Json<Item>> {
    let item = state
        .items
        .update(&item_id, update)
        .ok_or_else(|| TaskhubError::item_not_found(&item_id))?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<DictServiceState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    state
        .items
        .remove(&item_id)
        .ok_or_else(|| TaskhubError::item_not_found(&item_id))?;
    Ok(Json(ActionResponse::message("Item deleted")))
}
