//! Main warehouse inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Badge, Badged, Tone};
use crate::validation::validate_non_negative;

/// Stock level as derived by the inventory service from quantity thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl Badged for StockStatus {
    fn badge(&self) -> Badge {
        match self {
            StockStatus::InStock => Badge::new("In stock", Tone::Success),
            StockStatus::LowStock => Badge::new("Low stock", Tone::Warning),
            StockStatus::OutOfStock => Badge::new("Out of stock", Tone::Danger),
        }
    }
}

/// An item of the main warehouse inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: Decimal,
    pub status: StockStatus,
    #[serde(default)]
    pub total_value: Decimal,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating or updating an inventory item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInput {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    #[validate(custom = "validate_non_negative")]
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub quantity: Decimal,
}

/// Counts and value over a list of inventory items
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_value: Decimal,
}

impl InventorySummary {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> Self {
        items.into_iter().fold(Self::default(), |mut acc, item| {
            acc.total_items += 1;
            acc.total_value = acc.total_value.saturating_add(item.total_value);
            match item.status {
                StockStatus::InStock => acc.in_stock += 1,
                StockStatus::LowStock => acc.low_stock += 1,
                StockStatus::OutOfStock => acc.out_of_stock += 1,
            }
            acc
        })
    }

    /// Items needing a reorder
    pub fn attention_count(&self) -> usize {
        self.low_stock + self.out_of_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: StockStatus, value: i64) -> InventoryItem {
        InventoryItem {
            id: "x".into(),
            product_name: "Flour".into(),
            code: None,
            unit: Some("kg".into()),
            quantity: Decimal::from(3),
            status,
            total_value: Decimal::from(value),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn summary_counts_by_status() {
        let items = vec![
            item(StockStatus::InStock, 10),
            item(StockStatus::LowStock, 5),
            item(StockStatus::OutOfStock, 0),
            item(StockStatus::InStock, 7),
        ];
        let summary = InventorySummary::from_items(&items);
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.in_stock, 2);
        assert_eq!(summary.attention_count(), 2);
        assert_eq!(summary.total_value, Decimal::from(22));
    }

    #[test]
    fn status_uses_kebab_case() {
        let status: StockStatus = serde_json::from_str("\"out-of-stock\"").unwrap();
        assert_eq!(status, StockStatus::OutOfStock);
        assert_eq!(status.badge().tone, Tone::Danger);
    }

    #[test]
    fn input_rejects_negative_quantity() {
        let input = InventoryInput {
            product_name: "Rice".into(),
            code: None,
            unit: "kg".into(),
            quantity: Decimal::from(-1),
        };
        assert!(input.validate().is_err());
    }
}
