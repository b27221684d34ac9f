//! Recipe models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Ref;
use crate::types::{Badge, Badged, Tone};

/// Whether an ingredient line points at an inventory item or another product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IngredientType {
    Inventory,
    Product,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub ingredient_type: IngredientType,
    pub ingredient: Ref,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: String,
    pub product: Ref,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Active flag rendered as a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveFlag(pub bool);

impl Badged for ActiveFlag {
    fn badge(&self) -> Badge {
        if self.0 {
            Badge::new("Active", Tone::Success)
        } else {
            Badge::new("Inactive", Tone::Neutral)
        }
    }
}

/// Ingredient line of a recipe form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInput {
    pub ingredient_type: IngredientType,
    pub ingredient: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub quantity: Decimal,
}

/// Input for creating or updating a recipe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    #[validate(length(min = 1, message = "Product is required"))]
    pub product: String,
    pub ingredients: Vec<IngredientInput>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of an active/inactive toggle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveUpdate {
    pub is_active: bool,
}
