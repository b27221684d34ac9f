//! HTTP handlers for order endpoints

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{Checkout, InnerStatus, MergeOrders, OrderStatus, Page, StatusUpdate};

use crate::error::AppResult;
use crate::handlers::optional_json;
use crate::middleware::StaffToken;
use crate::services::orders::{KitchenBoard, OrderDetail, OrderFilter, OrderRow, OrderService};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardQuery {
    pub kitchen: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatusBody {
    pub inner_status: Option<InnerStatus>,
}

/// List orders
pub async fn list_orders(
    State(state): State<AppState>,
    token: StaffToken,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Page<OrderRow>>> {
    let service = OrderService::new(state.api);
    let orders = service.list(&token, &filter).await?;
    Ok(Json(orders))
}

/// Get one order with its line items
pub async fn get_order(
    State(state): State<AppState>,
    token: StaffToken,
    Path(order_id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let service = OrderService::new(state.api);
    let detail = service.detail(&token, &order_id).await?;
    Ok(Json(detail))
}

/// Kitchen board
pub async fn get_kitchen_board(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<BoardQuery>,
) -> AppResult<Json<KitchenBoard>> {
    let service = OrderService::new(state.api);
    let board = service.kitchen_board(&token, query.kitchen).await?;
    Ok(Json(board))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    token: StaffToken,
    Path(order_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = OrderService::new(state.api);
    Ok(Json(service.cancel(&token, &order_id).await?))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    token: StaffToken,
    Path(order_id): Path<String>,
    Json(body): Json<StatusUpdate<OrderStatus>>,
) -> AppResult<Json<serde_json::Value>> {
    let service = OrderService::new(state.api);
    Ok(Json(service.update_status(&token, &order_id, body.status).await?))
}

/// Advance a line item; an empty body moves it one step forward
pub async fn update_item_status(
    State(state): State<AppState>,
    token: StaffToken,
    Path((order_id, item_id)): Path<(String, String)>,
    body: Bytes,
) -> AppResult<Json<serde_json::Value>> {
    let target = optional_json::<ItemStatusBody>(&body)?.and_then(|b| b.inner_status);
    let service = OrderService::new(state.api);
    Ok(Json(
        service
            .advance_item(&token, &order_id, &item_id, target)
            .await?,
    ))
}

pub async fn merge_orders(
    State(state): State<AppState>,
    token: StaffToken,
    Json(body): Json<MergeOrders>,
) -> AppResult<Json<serde_json::Value>> {
    let service = OrderService::new(state.api);
    Ok(Json(service.merge(&token, body.order_ids).await?))
}

pub async fn checkout_order(
    State(state): State<AppState>,
    token: StaffToken,
    Path(order_id): Path<String>,
    body: Bytes,
) -> AppResult<Json<serde_json::Value>> {
    let body: Checkout = optional_json(&body)?.unwrap_or_default();
    let service = OrderService::new(state.api);
    Ok(Json(service.checkout(&token, &order_id, body).await?))
}
