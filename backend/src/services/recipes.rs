//! Recipes: what one unit of a product consumes

use serde::Serialize;
use shared::{
    validate_recipe_ingredients, ActiveFlag, ActiveUpdate, ApiItem, ApiList, Badge, Badged,
    ListQuery, Page, Recipe, RecipeInput,
};
use validator::Validate;

use crate::error::AppResult;
use crate::external::{segment, BackofficeApi};
use crate::middleware::StaffToken;

#[derive(Clone)]
pub struct RecipeService {
    api: BackofficeApi,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRow {
    pub id: String,
    pub product: String,
    pub ingredient_count: usize,
    pub is_active: bool,
    pub badge: Badge,
}

impl From<&Recipe> for RecipeRow {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            product: recipe.product.label().to_string(),
            ingredient_count: recipe.ingredients.len(),
            is_active: recipe.is_active,
            badge: ActiveFlag(recipe.is_active).badge(),
        }
    }
}

impl RecipeService {
    pub fn new(api: BackofficeApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, token: &StaffToken, query: &ListQuery) -> AppResult<Page<RecipeRow>> {
        let recipes: ApiList<Recipe> = self.api.get(token, "recipe", &query.to_pairs()).await?;
        Ok(recipes.into_page().map(|r| RecipeRow::from(&r)))
    }

    pub async fn get(&self, token: &StaffToken, recipe_id: &str) -> AppResult<Recipe> {
        let recipe: ApiItem<Recipe> = self
            .api
            .get(token, &format!("recipe/{}", segment(recipe_id)?), &[])
            .await?;
        Ok(recipe.into_inner())
    }

    pub async fn create(&self, token: &StaffToken, input: RecipeInput) -> AppResult<serde_json::Value> {
        input.validate()?;
        validate_recipe_ingredients(&input.ingredients)?;
        self.api.post(token, "recipe", &input).await
    }

    pub async fn update(
        &self,
        token: &StaffToken,
        recipe_id: &str,
        input: RecipeInput,
    ) -> AppResult<serde_json::Value> {
        input.validate()?;
        validate_recipe_ingredients(&input.ingredients)?;
        self.api
            .put(token, &format!("recipe/{}", segment(recipe_id)?), &input)
            .await
    }

    /// Flip a recipe on or off without touching its ingredients
    pub async fn set_active(
        &self,
        token: &StaffToken,
        recipe_id: &str,
        is_active: bool,
    ) -> AppResult<serde_json::Value> {
        tracing::info!("Setting recipe {} active={}", recipe_id, is_active);
        self.api
            .patch(token, &format!("recipe/{}", segment(recipe_id)?), &ActiveUpdate { is_active })
            .await
    }

    pub async fn delete(&self, token: &StaffToken, recipe_id: &str) -> AppResult<serde_json::Value> {
        self.api.delete(token, &format!("recipe/{}", segment(recipe_id)?)).await
    }
}
