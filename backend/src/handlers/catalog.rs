//! HTTP handlers for reference data and staff accounts

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::{CatalogEntry, CatalogResource, Kitchen, ListQuery, Page, Staff, StaffInput};

use crate::error::{AppError, AppResult};
use crate::middleware::StaffToken;
use crate::services::catalog::{CatalogRow, CatalogService};
use crate::AppState;

fn resource(slug: &str) -> AppResult<CatalogResource> {
    CatalogResource::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("Resource '{}'", slug)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    token: StaffToken,
    Path(slug): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<CatalogRow>>> {
    let resource = resource(&slug)?;
    let service = CatalogService::new(state.api);
    Ok(Json(service.list(&token, resource, &query).await?))
}

pub async fn get_entry(
    State(state): State<AppState>,
    token: StaffToken,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<Json<CatalogEntry>> {
    let resource = resource(&slug)?;
    let service = CatalogService::new(state.api);
    Ok(Json(service.get(&token, resource, &id).await?))
}

pub async fn create_entry(
    State(state): State<AppState>,
    token: StaffToken,
    Path(slug): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let resource = resource(&slug)?;
    let service = CatalogService::new(state.api);
    Ok(Json(service.create(&token, resource, body).await?))
}

pub async fn update_entry(
    State(state): State<AppState>,
    token: StaffToken,
    Path((slug, id)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let resource = resource(&slug)?;
    let service = CatalogService::new(state.api);
    Ok(Json(service.update(&token, resource, &id, body).await?))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    token: StaffToken,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<Json<serde_json::Value>> {
    let resource = resource(&slug)?;
    let service = CatalogService::new(state.api);
    Ok(Json(service.delete(&token, resource, &id).await?))
}

/// Kitchens for pickers
pub async fn list_kitchens(
    State(state): State<AppState>,
    token: StaffToken,
) -> AppResult<Json<Vec<Kitchen>>> {
    let service = CatalogService::new(state.api);
    Ok(Json(service.kitchens(&token).await?))
}

pub async fn list_staff(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<Staff>>> {
    let service = CatalogService::new(state.api);
    Ok(Json(service.staff(&token, &query).await?))
}

pub async fn create_staff(
    State(state): State<AppState>,
    token: StaffToken,
    Json(input): Json<StaffInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = CatalogService::new(state.api);
    Ok(Json(service.create_staff(&token, input).await?))
}

pub async fn update_staff(
    State(state): State<AppState>,
    token: StaffToken,
    Path(staff_id): Path<String>,
    Json(input): Json<StaffInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = CatalogService::new(state.api);
    Ok(Json(service.update_staff(&token, &staff_id, input).await?))
}

pub async fn delete_staff(
    State(state): State<AppState>,
    token: StaffToken,
    Path(staff_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = CatalogService::new(state.api);
    Ok(Json(service.delete_staff(&token, &staff_id).await?))
}
