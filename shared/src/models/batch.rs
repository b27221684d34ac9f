//! Kitchen sub-inventory batches and their FIFO consumption

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Badge, Badged, Tone};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    #[default]
    Active,
    Depleted,
    Expired,
    #[serde(other)]
    Other,
}

impl Badged for BatchStatus {
    fn badge(&self) -> Badge {
        match self {
            BatchStatus::Active => Badge::new("Active", Tone::Success),
            BatchStatus::Depleted => Badge::new("Depleted", Tone::Neutral),
            BatchStatus::Expired => Badge::new("Expired", Tone::Danger),
            BatchStatus::Other => Badge::new("Unknown", Tone::Neutral),
        }
    }
}

/// Quantity ledger of a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchQuantity {
    pub original: Decimal,
    pub remaining: Decimal,
    pub consumed: Decimal,
    pub consumed_percentage: Decimal,
}

impl BatchQuantity {
    /// `remaining + consumed == original`, maintained by the inventory service
    pub fn is_consistent(&self) -> bool {
        self.remaining.checked_add(self.consumed) == Some(self.original)
            && self.remaining >= Decimal::ZERO
            && self.consumed >= Decimal::ZERO
    }

    /// Consumed share in percent, recomputed from the ledger
    pub fn computed_percentage(&self) -> Decimal {
        if self.original.is_zero() {
            return Decimal::ZERO;
        }
        self.consumed
            .checked_div(self.original)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.round_dp(2))
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchPricing {
    pub unit_cost: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierInfo {
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    pub purchase_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferInfo {
    pub transfer_id: Option<String>,
    pub transfer_number: Option<String>,
    pub transfer_date: Option<DateTime<Utc>>,
}

/// A tracked slice of transferred inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub quantity: BatchQuantity,
    #[serde(default)]
    pub pricing: BatchPricing,
    #[serde(default)]
    pub supplier_info: SupplierInfo,
    #[serde(default)]
    pub transfer_info: TransferInfo,
    #[serde(default)]
    pub status: BatchStatus,
}

impl Batch {
    pub fn remaining_value(&self) -> Decimal {
        self.quantity.remaining.saturating_mul(self.pricing.unit_cost)
    }

    pub fn consumed_value(&self) -> Decimal {
        self.quantity.consumed.saturating_mul(self.pricing.unit_cost)
    }

    pub fn is_available(&self) -> bool {
        self.status == BatchStatus::Active && self.quantity.remaining > Decimal::ZERO
    }
}

/// Sort batches oldest transfer first; undated batches go last, ties by id
pub fn fifo_order(batches: &mut [Batch]) {
    batches.sort_by(|a, b| {
        let date_a = a.transfer_info.transfer_date;
        let date_b = b.transfer_info.transfer_date;
        match (date_a, date_b) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| a.id.cmp(&b.id))
    });
}

/// A slice drawn from one batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionSlice {
    pub batch_id: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConsumptionError {
    #[error("Quantity must be positive")]
    NonPositive,

    #[error("Insufficient stock: {shortfall} more needed")]
    Insufficient { shortfall: Decimal },
}

/// Preview which batches a consumption of `quantity` would draw from, FIFO
///
/// Only available batches are considered. Nothing is mutated; the inventory
/// service performs the real consumption.
pub fn plan_consumption(
    batches: &[Batch],
    quantity: Decimal,
) -> Result<Vec<ConsumptionSlice>, ConsumptionError> {
    if quantity <= Decimal::ZERO {
        return Err(ConsumptionError::NonPositive);
    }

    let mut ordered: Vec<Batch> = batches.iter().filter(|b| b.is_available()).cloned().collect();
    fifo_order(&mut ordered);

    let mut outstanding = quantity;
    let mut plan = Vec::new();
    for batch in ordered {
        if outstanding.is_zero() {
            break;
        }
        let take = outstanding.min(batch.quantity.remaining);
        outstanding -= take;
        plan.push(ConsumptionSlice {
            batch_id: batch.id,
            quantity: take,
            unit_cost: batch.pricing.unit_cost,
        });
    }

    if outstanding > Decimal::ZERO {
        return Err(ConsumptionError::Insufficient {
            shortfall: outstanding,
        });
    }
    Ok(plan)
}

/// Cost of a consumption plan
pub fn plan_cost(plan: &[ConsumptionSlice]) -> Decimal {
    plan.iter()
        .map(|s| s.quantity.saturating_mul(s.unit_cost))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
