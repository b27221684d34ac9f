//! HTTP handlers for supplier endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::{ListQuery, Page, Supplier, SupplierInput};

use crate::error::AppResult;
use crate::middleware::StaffToken;
use crate::services::suppliers::{SupplierRow, SupplierService};
use crate::AppState;

pub async fn list_suppliers(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<SupplierRow>>> {
    let service = SupplierService::new(state.api);
    Ok(Json(service.list(&token, &query).await?))
}

/// Active suppliers for pickers
pub async fn supplier_options(
    State(state): State<AppState>,
    token: StaffToken,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.api);
    Ok(Json(service.options(&token).await?))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    token: StaffToken,
    Path(supplier_id): Path<String>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.api);
    Ok(Json(service.get(&token, &supplier_id).await?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    token: StaffToken,
    Json(input): Json<SupplierInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = SupplierService::new(state.api);
    Ok(Json(service.create(&token, input).await?))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    token: StaffToken,
    Path(supplier_id): Path<String>,
    Json(input): Json<SupplierInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = SupplierService::new(state.api);
    Ok(Json(service.update(&token, &supplier_id, input).await?))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    token: StaffToken,
    Path(supplier_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = SupplierService::new(state.api);
    Ok(Json(service.delete(&token, &supplier_id).await?))
}
