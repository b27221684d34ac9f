//! Supplier purchases

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    validate_purchase, ApiItem, ApiList, Badge, ListQuery, Page, Purchase, PurchaseRequest, Tone,
};

use crate::error::{AppError, AppResult};
use crate::external::{segment, BackofficeApi};
use crate::middleware::StaffToken;

#[derive(Clone)]
pub struct PurchaseService {
    api: BackofficeApi,
}

/// Row of the purchase table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRow {
    pub id: String,
    pub title: String,
    pub supplier: Option<String>,
    pub line_count: usize,
    pub grand_total: Decimal,
    pub paid_amount: Decimal,
    pub balance_due: Decimal,
    pub badge: Badge,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Purchase> for PurchaseRow {
    fn from(purchase: &Purchase) -> Self {
        let badge = if purchase.is_settled() {
            Badge::new("Paid", Tone::Success)
        } else if purchase.paid_amount > Decimal::ZERO {
            Badge::new("Partial", Tone::Warning)
        } else {
            Badge::new("Unpaid", Tone::Danger)
        };
        Self {
            id: purchase.id.clone(),
            title: purchase.title.clone(),
            supplier: purchase.supplier.as_ref().map(|s| s.label().to_string()),
            line_count: purchase.items.len(),
            grand_total: purchase.grand_total(),
            paid_amount: purchase.paid_amount,
            balance_due: purchase.balance_due(),
            badge,
            created_at: purchase.created_at,
        }
    }
}

impl PurchaseService {
    pub fn new(api: BackofficeApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, token: &StaffToken, query: &ListQuery) -> AppResult<Page<PurchaseRow>> {
        let purchases: ApiList<Purchase> = self.api.get(token, "purchase", &query.to_pairs()).await?;
        Ok(purchases.into_page().map(|p| PurchaseRow::from(&p)))
    }

    pub async fn get(&self, token: &StaffToken, purchase_id: &str) -> AppResult<Purchase> {
        let purchase: ApiItem<Purchase> = self
            .api
            .get(token, &format!("purchase/{}", segment(purchase_id)?), &[])
            .await?;
        Ok(purchase.into_inner())
    }

    /// Record a purchase; stock of the purchased items goes up on the remote side
    pub async fn create(&self, token: &StaffToken, request: PurchaseRequest) -> AppResult<serde_json::Value> {
        let request = normalize(request)?;
        tracing::info!(
            "Recording purchase '{}' ({} lines, total {})",
            request.title,
            request.items.len(),
            request.grand_total()
        );
        let created = self.api.post(token, "purchase", &request).await?;
        self.api.invalidate("inventory").await;
        Ok(created)
    }

    pub async fn update(
        &self,
        token: &StaffToken,
        purchase_id: &str,
        request: PurchaseRequest,
    ) -> AppResult<serde_json::Value> {
        let request = normalize(request)?;
        let updated = self
            .api
            .put(token, &format!("purchase/{}", segment(purchase_id)?), &request)
            .await?;
        self.api.invalidate("inventory").await;
        Ok(updated)
    }

    pub async fn delete(&self, token: &StaffToken, purchase_id: &str) -> AppResult<serde_json::Value> {
        let deleted = self
            .api
            .delete(token, &format!("purchase/{}", segment(purchase_id)?))
            .await?;
        self.api.invalidate("inventory").await;
        Ok(deleted)
    }
}

/// Validate a purchase request and recompute each line total
fn normalize(mut request: PurchaseRequest) -> AppResult<PurchaseRequest> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation {
            field: "title".to_string(),
            message: "Title is required".to_string(),
        });
    }
    validate_purchase(&request.items, request.paid_amount)?;
    for (index, item) in request.items.iter_mut().enumerate() {
        item.total = item.price.checked_mul(item.quantity).ok_or_else(|| AppError::Validation {
            field: format!("items[{}].price", index),
            message: "Amount is too large".to_string(),
        })?;
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn request(paid: &str) -> PurchaseRequest {
        PurchaseRequest {
            title: "Weekly dairy".to_string(),
            supplier: None,
            items: vec![shared::PurchaseItemInput {
                inventory_id: "inv1".to_string(),
                price: dec("2.50"),
                quantity: dec("4"),
                total: Decimal::ZERO,
            }],
            paid_amount: dec(paid),
        }
    }

    #[test]
    fn normalize_recomputes_line_totals() {
        let normalized = normalize(request("5")).unwrap();
        assert_eq!(normalized.items[0].total, dec("10.00"));
    }

    #[test]
    fn normalize_rejects_overpayment() {
        let err = normalize(request("10.01")).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "paidAmount"));
    }

    #[test]
    fn normalize_rejects_amounts_that_overflow() {
        let mut request = request("0");
        request.items[0].price = Decimal::MAX;
        let err = normalize(request).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "items[0].price"));
    }

    #[test]
    fn row_badge_follows_balance() {
        let purchase: Purchase = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "title": "Beans",
            "items": [{"inventoryId": "inv1", "price": 3, "quantity": 2}],
            "paidAmount": 2
        }))
        .unwrap();
        let row = PurchaseRow::from(&purchase);
        assert_eq!(row.grand_total, dec("6"));
        assert_eq!(row.balance_due, dec("4"));
        assert_eq!(row.badge.label, "Partial");
    }
}
