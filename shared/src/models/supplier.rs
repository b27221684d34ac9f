//! Supplier models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Badge, Badged, Tone};
use crate::validation::validate_supplier_code_field;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SupplierStatus {
    #[default]
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "inActive", alias = "inactive")]
    Inactive,
}

impl Badged for SupplierStatus {
    fn badge(&self) -> Badge {
        match self {
            SupplierStatus::Active => Badge::new("Active", Tone::Success),
            SupplierStatus::Inactive => Badge::new("Inactive", Tone::Danger),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: SupplierStatus,
}

/// Input for creating or updating a supplier
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
    #[validate(custom = "validate_supplier_code_field")]
    pub code: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub status: SupplierStatus,
}
