//! Main warehouse inventory screens

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    ApiItem, ApiList, Badge, Badged, InventoryInput, InventoryItem, InventorySummary, ListQuery,
    Page, StockStatus,
};
use validator::Validate;

use crate::error::AppResult;
use crate::external::{segment, BackofficeApi};
use crate::middleware::StaffToken;

/// Inventory service for the main warehouse ledger
#[derive(Clone)]
pub struct InventoryService {
    api: BackofficeApi,
}

/// Row of the inventory table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub id: String,
    pub product_name: String,
    pub code: Option<String>,
    pub unit: Option<String>,
    pub quantity: Decimal,
    pub total_value: Decimal,
    pub status: StockStatus,
    pub badge: Badge,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<InventoryItem> for InventoryRow {
    fn from(item: InventoryItem) -> Self {
        Self {
            badge: item.status.badge(),
            id: item.id,
            product_name: item.product_name,
            code: item.code,
            unit: item.unit,
            quantity: item.quantity,
            total_value: item.total_value,
            status: item.status,
            updated_at: item.updated_at.or(item.created_at),
        }
    }
}

/// Inventory table with its summary cards
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub summary: InventorySummary,
    #[serde(flatten)]
    pub page: Page<InventoryRow>,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(api: BackofficeApi) -> Self {
        Self { api }
    }

    /// Raw inventory items
    pub async fn items(&self, token: &StaffToken, query: &ListQuery) -> AppResult<Page<InventoryItem>> {
        let items: ApiList<InventoryItem> = self.api.get(token, "inventory", &query.to_pairs()).await?;
        Ok(items.into_page())
    }

    /// Every inventory item across all pages
    pub async fn all_items(&self, token: &StaffToken) -> AppResult<Vec<InventoryItem>> {
        self.api.get_all(token, "inventory", &[]).await
    }

    /// Warehouse-wide summary cards
    pub async fn summary(&self, token: &StaffToken) -> AppResult<InventorySummary> {
        let items = self.all_items(token).await?;
        Ok(InventorySummary::from_items(&items))
    }

    /// Inventory table: one row per item with its stock badge
    pub async fn list(&self, token: &StaffToken, query: &ListQuery) -> AppResult<InventoryView> {
        let page = self.items(token, query).await?;
        let summary = InventorySummary::from_items(&page.data);
        Ok(InventoryView {
            summary,
            page: page.map(InventoryRow::from),
        })
    }

    pub async fn get(&self, token: &StaffToken, item_id: &str) -> AppResult<InventoryItem> {
        let item: ApiItem<InventoryItem> = self
            .api
            .get(token, &format!("inventory/{}", segment(item_id)?), &[])
            .await?;
        Ok(item.into_inner())
    }

    pub async fn create(&self, token: &StaffToken, input: InventoryInput) -> AppResult<serde_json::Value> {
        input.validate()?;
        tracing::info!("Creating inventory item '{}'", input.product_name);
        self.api.post(token, "inventory", &input).await
    }

    pub async fn update(
        &self,
        token: &StaffToken,
        item_id: &str,
        input: InventoryInput,
    ) -> AppResult<serde_json::Value> {
        input.validate()?;
        self.api
            .put(token, &format!("inventory/{}", segment(item_id)?), &input)
            .await
    }

    pub async fn delete(&self, token: &StaffToken, item_id: &str) -> AppResult<serde_json::Value> {
        let result = self
            .api
            .delete(token, &format!("inventory/{}", segment(item_id)?))
            .await?;
        // Kitchen stock views label lines by their main inventory item
        self.api.invalidate("sub-inventory").await;
        Ok(result)
    }
}
