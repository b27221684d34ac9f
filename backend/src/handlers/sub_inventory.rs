//! HTTP handlers for kitchen sub-inventory endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{CreateTransfer, KitchenStockItem, Page};

use crate::error::AppResult;
use crate::middleware::StaffToken;
use crate::services::sub_inventory::{BatchLedger, HistoryFilter, SubInventoryService, TransferRow};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    /// Quantity to simulate a FIFO consumption for
    pub preview: Option<Decimal>,
}

/// Transfer stock from the main warehouse into a kitchen
pub async fn create_transfer(
    State(state): State<AppState>,
    token: StaffToken,
    Json(input): Json<CreateTransfer>,
) -> AppResult<Json<serde_json::Value>> {
    let service = SubInventoryService::new(state.api);
    Ok(Json(service.create_transfer(&token, input).await?))
}

pub async fn get_kitchen_stock(
    State(state): State<AppState>,
    token: StaffToken,
    Path(kitchen_id): Path<String>,
) -> AppResult<Json<Vec<KitchenStockItem>>> {
    let service = SubInventoryService::new(state.api);
    Ok(Json(service.kitchen_stock(&token, &kitchen_id).await?))
}

pub async fn get_batches(
    State(state): State<AppState>,
    token: StaffToken,
    Path((kitchen_id, inventory_id)): Path<(String, String)>,
    Query(query): Query<BatchQuery>,
) -> AppResult<Json<BatchLedger>> {
    let service = SubInventoryService::new(state.api);
    let ledger = service
        .batches(&token, &kitchen_id, &inventory_id, query.preview)
        .await?;
    Ok(Json(ledger))
}

pub async fn get_transfer_history(
    State(state): State<AppState>,
    token: StaffToken,
    Query(filter): Query<HistoryFilter>,
) -> AppResult<Json<Page<TransferRow>>> {
    let service = SubInventoryService::new(state.api);
    Ok(Json(service.history(&token, &filter).await?))
}
