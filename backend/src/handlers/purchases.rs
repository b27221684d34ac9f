//! HTTP handlers for purchase endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::{ListQuery, Page, Purchase, PurchaseRequest};

use crate::error::AppResult;
use crate::middleware::StaffToken;
use crate::services::purchases::{PurchaseRow, PurchaseService};
use crate::AppState;

pub async fn list_purchases(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<PurchaseRow>>> {
    let service = PurchaseService::new(state.api);
    Ok(Json(service.list(&token, &query).await?))
}

pub async fn get_purchase(
    State(state): State<AppState>,
    token: StaffToken,
    Path(purchase_id): Path<String>,
) -> AppResult<Json<Purchase>> {
    let service = PurchaseService::new(state.api);
    Ok(Json(service.get(&token, &purchase_id).await?))
}

pub async fn create_purchase(
    State(state): State<AppState>,
    token: StaffToken,
    Json(request): Json<PurchaseRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let service = PurchaseService::new(state.api);
    Ok(Json(service.create(&token, request).await?))
}

pub async fn update_purchase(
    State(state): State<AppState>,
    token: StaffToken,
    Path(purchase_id): Path<String>,
    Json(request): Json<PurchaseRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let service = PurchaseService::new(state.api);
    Ok(Json(service.update(&token, &purchase_id, request).await?))
}

pub async fn delete_purchase(
    State(state): State<AppState>,
    token: StaffToken,
    Path(purchase_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = PurchaseService::new(state.api);
    Ok(Json(service.delete(&token, &purchase_id).await?))
}
