//! HTTP handlers for recipe endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::{ActiveUpdate, ListQuery, Page, Recipe, RecipeInput};

use crate::error::AppResult;
use crate::middleware::StaffToken;
use crate::services::recipes::{RecipeRow, RecipeService};
use crate::AppState;

pub async fn list_recipes(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<RecipeRow>>> {
    let service = RecipeService::new(state.api);
    Ok(Json(service.list(&token, &query).await?))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    token: StaffToken,
    Path(recipe_id): Path<String>,
) -> AppResult<Json<Recipe>> {
    let service = RecipeService::new(state.api);
    Ok(Json(service.get(&token, &recipe_id).await?))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    token: StaffToken,
    Json(input): Json<RecipeInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = RecipeService::new(state.api);
    Ok(Json(service.create(&token, input).await?))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    token: StaffToken,
    Path(recipe_id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = RecipeService::new(state.api);
    Ok(Json(service.update(&token, &recipe_id, input).await?))
}

/// Toggle a recipe on or off
pub async fn set_recipe_active(
    State(state): State<AppState>,
    token: StaffToken,
    Path(recipe_id): Path<String>,
    Json(body): Json<ActiveUpdate>,
) -> AppResult<Json<serde_json::Value>> {
    let service = RecipeService::new(state.api);
    Ok(Json(
        service
            .set_active(&token, &recipe_id, body.is_active)
            .await?,
    ))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    token: StaffToken,
    Path(recipe_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = RecipeService::new(state.api);
    Ok(Json(service.delete(&token, &recipe_id).await?))
}
