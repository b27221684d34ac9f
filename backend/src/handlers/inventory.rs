//! HTTP handlers for main inventory endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::{InventoryInput, InventoryItem, InventorySummary, ListQuery};

use crate::error::AppResult;
use crate::middleware::StaffToken;
use crate::services::inventory::{InventoryService, InventoryView};
use crate::AppState;

/// Inventory table with summary cards
pub async fn list_inventory(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<InventoryView>> {
    let service = InventoryService::new(state.api);
    let view = service.list(&token, &query).await?;
    Ok(Json(view))
}

/// Summary cards only
pub async fn get_inventory_summary(
    State(state): State<AppState>,
    token: StaffToken,
) -> AppResult<Json<InventorySummary>> {
    let service = InventoryService::new(state.api);
    Ok(Json(service.summary(&token).await?))
}

pub async fn get_inventory_item(
    State(state): State<AppState>,
    token: StaffToken,
    Path(item_id): Path<String>,
) -> AppResult<Json<InventoryItem>> {
    let service = InventoryService::new(state.api);
    Ok(Json(service.get(&token, &item_id).await?))
}

pub async fn create_inventory_item(
    State(state): State<AppState>,
    token: StaffToken,
    Json(input): Json<InventoryInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = InventoryService::new(state.api);
    Ok(Json(service.create(&token, input).await?))
}

pub async fn update_inventory_item(
    State(state): State<AppState>,
    token: StaffToken,
    Path(item_id): Path<String>,
    Json(input): Json<InventoryInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = InventoryService::new(state.api);
    Ok(Json(service.update(&token, &item_id, input).await?))
}

pub async fn delete_inventory_item(
    State(state): State<AppState>,
    token: StaffToken,
    Path(item_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = InventoryService::new(state.api);
    Ok(Json(service.delete(&token, &item_id).await?))
}
