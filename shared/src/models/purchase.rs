//! Purchase models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Ref;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub inventory_id: Ref,
    pub price: Decimal,
    pub quantity: Decimal,
    #[serde(default)]
    pub total: Option<Decimal>,
}

impl PurchaseItem {
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<PurchaseItem>,
    #[serde(default)]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub supplier: Option<Ref>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Purchase {
    /// Σ price × quantity over all lines
    pub fn grand_total(&self) -> Decimal {
        self.items
            .iter()
            .map(PurchaseItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn balance_due(&self) -> Decimal {
        self.grand_total().saturating_sub(self.paid_amount)
    }

    pub fn is_settled(&self) -> bool {
        self.balance_due() <= Decimal::ZERO
    }
}

/// Line of a purchase request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemInput {
    pub inventory_id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub quantity: Decimal,
    /// Recomputed from price and quantity before sending
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
}

/// Request body for creating or updating a purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub items: Vec<PurchaseItemInput>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub paid_amount: Decimal,
}

impl PurchaseRequest {
    pub fn grand_total(&self) -> Decimal {
        checked_grand_total(self.items.iter().map(|i| (i.price, i.quantity))).unwrap_or(Decimal::MAX)
    }
}

/// Σ price × quantity, or the index of the first line whose amount no
/// longer fits a `Decimal`
pub fn checked_grand_total(
    lines: impl IntoIterator<Item = (Decimal, Decimal)>,
) -> Result<Decimal, usize> {
    lines
        .into_iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |acc, (index, (price, quantity))| {
            price
                .checked_mul(quantity)
                .and_then(|line| acc.checked_add(line))
                .ok_or(index)
        })
}
