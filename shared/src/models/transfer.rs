//! Transfers from the main warehouse into kitchen sub-inventories

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Ref;
use crate::types::{Badge, Badged, Tone};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    #[default]
    Completed,
    Pending,
    Cancelled,
    #[serde(other)]
    Other,
}

impl Badged for TransferStatus {
    fn badge(&self) -> Badge {
        match self {
            TransferStatus::Completed => Badge::new("Completed", Tone::Success),
            TransferStatus::Pending => Badge::new("Pending", Tone::Warning),
            TransferStatus::Cancelled => Badge::new("Cancelled", Tone::Danger),
            TransferStatus::Other => Badge::new("Unknown", Tone::Neutral),
        }
    }
}

/// One batch slice created or drawn by a transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferredBatch {
    #[serde(alias = "batch", alias = "_id")]
    pub batch_id: String,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_cost: Decimal,
}

/// Audit record of a main → kitchen transfer; never edited once created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub transfer_number: Option<String>,
    pub main_inventory_id: Ref,
    pub kitchen_id: Ref,
    pub quantity: Decimal,
    #[serde(default)]
    pub total_cost: Decimal,
    #[serde(default)]
    pub batches_transferred: Vec<TransferredBatch>,
    #[serde(default)]
    pub status: TransferStatus,
    #[serde(default)]
    pub transferred_by: Option<Ref>,
    #[serde(default)]
    pub notes: Option<String>,
    pub transfer_date: Option<DateTime<Utc>>,
}

impl Transfer {
    /// Average unit cost of the quantity moved
    pub fn unit_cost(&self) -> Option<Decimal> {
        if self.quantity.is_zero() {
            None
        } else {
            Some(self.total_cost / self.quantity)
        }
    }
}

/// Request body for creating a transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransfer {
    pub main_inventory_id: String,
    pub kitchen_id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub quantity: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One inventory line of a kitchen's sub-inventory, aggregated over its batches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KitchenStockItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(alias = "mainInventoryId")]
    pub inventory: Ref,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, alias = "totalQuantity")]
    pub total_remaining: Decimal,
    #[serde(default)]
    pub total_consumed: Decimal,
    #[serde(default)]
    pub total_value: Decimal,
    #[serde(default)]
    pub batch_count: u32,
}

impl KitchenStockItem {
    pub fn label(&self) -> &str {
        self.product_name
            .as_deref()
            .unwrap_or_else(|| self.inventory.label())
    }
}
