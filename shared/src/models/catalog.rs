//! Reference data managed through plain CRUD screens

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ActiveFlag, Ref};
use crate::types::{Badge, Badged};

/// Reference resources of the remote API that share one generic CRUD screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogResource {
    Kitchen,
    Category,
    SubCategory,
    Product,
    Section,
    Tables,
    Offers,
    Ingredients,
    Location,
}

impl CatalogResource {
    pub const ALL: [CatalogResource; 9] = [
        CatalogResource::Kitchen,
        CatalogResource::Category,
        CatalogResource::SubCategory,
        CatalogResource::Product,
        CatalogResource::Section,
        CatalogResource::Tables,
        CatalogResource::Offers,
        CatalogResource::Ingredients,
        CatalogResource::Location,
    ];

    /// Path segment on the remote API
    pub fn path(&self) -> &'static str {
        match self {
            CatalogResource::Kitchen => "kitchen",
            CatalogResource::Category => "category",
            CatalogResource::SubCategory => "subCategory",
            CatalogResource::Product => "product",
            CatalogResource::Section => "section",
            CatalogResource::Tables => "tables",
            CatalogResource::Offers => "offers",
            CatalogResource::Ingredients => "ingredients",
            CatalogResource::Location => "location",
        }
    }

    /// Path segment on the dashboard's own routes
    pub fn slug(&self) -> &'static str {
        match self {
            CatalogResource::Kitchen => "kitchen",
            CatalogResource::Category => "category",
            CatalogResource::SubCategory => "sub-category",
            CatalogResource::Product => "product",
            CatalogResource::Section => "section",
            CatalogResource::Tables => "tables",
            CatalogResource::Offers => "offers",
            CatalogResource::Ingredients => "ingredients",
            CatalogResource::Location => "location",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }
}

/// Fields tried in order when a document has no `name`
const LABEL_FIELDS: [&str; 4] = ["title", "productName", "tableNumber", "sectionName"];

/// Any reference document, labelled for a table row
///
/// The resources differ in shape; the fields every screen shows are lifted
/// out and the rest is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<serde_json::Value>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogEntry {
    pub fn label(&self) -> String {
        let value = self.name.as_ref().filter(|v| !v.is_null()).or_else(|| {
            LABEL_FIELDS
                .iter()
                .filter_map(|field| self.extra.get(*field))
                .find(|v| !v.is_null())
        });
        match value {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => self.id.clone(),
        }
    }

    pub fn badge(&self) -> Option<Badge> {
        self.is_active.map(|active| ActiveFlag(active).badge())
    }
}

/// Kitchen, the owner of a sub-inventory and an order board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Kitchen {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub section: Option<Ref>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Staff account as listed by `auth/staff`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub kitchen: Option<Ref>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Input for creating or updating a staff account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitchen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}
