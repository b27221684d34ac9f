//! Kitchen sub-inventory: transfers from the main warehouse, per-kitchen
//! stock, batch ledgers, and transfer history

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    fifo_order, plan_consumption, plan_cost, validate_transfer_quantity, ApiItem, ApiList, Badge,
    Badged, Batch, ConsumptionError, ConsumptionSlice, CreateTransfer, InventoryItem,
    KitchenStockItem, ListQuery, Page, Transfer,
};

use crate::error::{AppError, AppResult};
use crate::external::{segment, BackofficeApi};
use crate::middleware::StaffToken;

#[derive(Clone)]
pub struct SubInventoryService {
    api: BackofficeApi,
}

/// Batch row with its derived figures
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    #[serde(flatten)]
    pub batch: Batch,
    pub badge: Badge,
    pub remaining_value: Decimal,
    pub consumed_value: Decimal,
    /// Consumed share in percent, recomputed from the ledger
    pub consumed_share: Decimal,
    /// False when `remaining + consumed != original`
    pub consistent: bool,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchTotals {
    pub original: Decimal,
    pub remaining: Decimal,
    pub consumed: Decimal,
    pub remaining_value: Decimal,
}

/// What the next consumption of a given quantity would draw
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum ConsumptionPreview {
    Covered {
        slices: Vec<ConsumptionSlice>,
        cost: Decimal,
    },
    Short {
        shortfall: Decimal,
    },
}

/// Batch ledger of one inventory item in one kitchen, oldest first
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchLedger {
    pub batches: Vec<BatchRow>,
    pub totals: BatchTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<ConsumptionPreview>,
}

impl BatchLedger {
    pub fn build(mut batches: Vec<Batch>, preview_quantity: Option<Decimal>) -> AppResult<Self> {
        fifo_order(&mut batches);

        let preview = match preview_quantity {
            None => None,
            Some(quantity) => match plan_consumption(&batches, quantity) {
                Ok(slices) => Some(ConsumptionPreview::Covered {
                    cost: plan_cost(&slices),
                    slices,
                }),
                Err(ConsumptionError::Insufficient { shortfall }) => {
                    Some(ConsumptionPreview::Short { shortfall })
                }
                Err(ConsumptionError::NonPositive) => {
                    return Err(AppError::Validation {
                        field: "preview".to_string(),
                        message: "Preview quantity must be greater than 0".to_string(),
                    })
                }
            },
        };

        let totals = batches.iter().fold(BatchTotals::default(), |mut acc, b| {
            acc.original = acc.original.saturating_add(b.quantity.original);
            acc.remaining = acc.remaining.saturating_add(b.quantity.remaining);
            acc.consumed = acc.consumed.saturating_add(b.quantity.consumed);
            acc.remaining_value = acc.remaining_value.saturating_add(b.remaining_value());
            acc
        });

        let batches = batches
            .into_iter()
            .map(|batch| {
                if !batch.quantity.is_consistent() {
                    tracing::warn!("Batch {} ledger does not add up", batch.id);
                }
                BatchRow {
                    badge: batch.status.badge(),
                    remaining_value: batch.remaining_value(),
                    consumed_value: batch.consumed_value(),
                    consumed_share: batch.quantity.computed_percentage(),
                    consistent: batch.quantity.is_consistent(),
                    batch,
                }
            })
            .collect();

        Ok(Self {
            batches,
            totals,
            preview,
        })
    }
}

/// Transfer history row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRow {
    #[serde(flatten)]
    pub transfer: Transfer,
    pub badge: Badge,
    pub unit_cost: Option<Decimal>,
}

/// Filters of the transfer history screen
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub kitchen_id: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

impl SubInventoryService {
    pub fn new(api: BackofficeApi) -> Self {
        Self { api }
    }

    /// Record a transfer from the main warehouse into a kitchen
    ///
    /// The requested quantity is checked against the main item's stock before
    /// the transfer request is sent.
    pub async fn create_transfer(
        &self,
        token: &StaffToken,
        input: CreateTransfer,
    ) -> AppResult<serde_json::Value> {
        if input.kitchen_id.trim().is_empty() {
            return Err(AppError::Validation {
                field: "kitchenId".to_string(),
                message: "Select a kitchen".to_string(),
            });
        }
        if input.quantity <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity must be greater than 0".to_string(),
            });
        }

        let item: ApiItem<InventoryItem> = self
            .api
            .get_fresh(token, &format!("inventory/{}", segment(&input.main_inventory_id)?))
            .await?;
        let item = item.into_inner();

        if let Err(e) = validate_transfer_quantity(input.quantity, item.quantity) {
            tracing::info!(
                "Rejected transfer of {} from '{}': {}",
                input.quantity,
                item.product_name,
                e
            );
            return Err(AppError::InsufficientInventory(e.message));
        }

        tracing::info!(
            "Transferring {} of '{}' to kitchen {}",
            input.quantity,
            item.product_name,
            input.kitchen_id
        );
        let created = self.api.post(token, "sub-inventory/transfer", &input).await?;
        self.api.invalidate("inventory").await;
        Ok(created)
    }

    /// Stock lines of one kitchen
    pub async fn kitchen_stock(
        &self,
        token: &StaffToken,
        kitchen_id: &str,
    ) -> AppResult<Vec<KitchenStockItem>> {
        let stock: ApiList<KitchenStockItem> = self
            .api
            .get(token, &format!("sub-inventory/kitchen/{}", segment(kitchen_id)?), &[])
            .await?;
        Ok(stock.into_vec())
    }

    /// Batch ledger of one item in one kitchen, with an optional FIFO preview
    pub async fn batches(
        &self,
        token: &StaffToken,
        kitchen_id: &str,
        inventory_id: &str,
        preview_quantity: Option<Decimal>,
    ) -> AppResult<BatchLedger> {
        let batches: ApiList<Batch> = self
            .api
            .get(
                token,
                &format!("sub-inventory/batches/{}/{}", segment(kitchen_id)?, segment(inventory_id)?),
                &[],
            )
            .await?;
        BatchLedger::build(batches.into_vec(), preview_quantity)
    }

    /// Transfer audit trail
    pub async fn history(&self, token: &StaffToken, filter: &HistoryFilter) -> AppResult<Page<TransferRow>> {
        let mut query = ListQuery {
            page: filter.page,
            limit: filter.limit,
            from: filter.from,
            to: filter.to,
            ..Default::default()
        }
        .to_pairs();
        if let Some(kitchen) = filter.kitchen_id.as_deref().filter(|k| !k.is_empty()) {
            query.push(("kitchenId", kitchen.to_string()));
        }

        let transfers: ApiList<Transfer> = self.api.get(token, "sub-inventory/history", &query).await?;
        Ok(transfers.into_page().map(|transfer| TransferRow {
            badge: transfer.status.badge(),
            unit_cost: transfer.unit_cost(),
            transfer,
        }))
    }
}
