//! Order screens: order list, order detail, kitchen board, and the
//! status transitions staff trigger from them

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    validate_inner_transition, validate_order_transition, ApiItem, ApiList, Badge, Badged,
    Checkout, Customizations, InnerStatus, ItemKind, MergeOrders, Order, OrderStatus, OrderType,
    Page, StatusUpdate,
};

use crate::error::{AppError, AppResult};
use crate::external::{segment, BackofficeApi};
use crate::middleware::StaffToken;

/// Order service
#[derive(Clone)]
pub struct OrderService {
    api: BackofficeApi,
}

/// Filters of the order list screen
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub order_type: Option<String>,
    pub kitchen: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

impl OrderFilter {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let list = shared::ListQuery {
            page: self.page,
            limit: self.limit,
            search: self.search.clone(),
            status: self.status.map(|s| s.as_str().to_string()),
            from: self.from,
            to: self.to,
        };
        let mut pairs = list.to_pairs();
        if let Some(order_type) = self.order_type.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("orderType", order_type.to_string()));
        }
        if let Some(kitchen) = self.kitchen.as_deref().filter(|k| !k.is_empty()) {
            pairs.push(("kitchen", kitchen.to_string()));
        }
        pairs
    }
}

/// Row of the order table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    pub number: String,
    pub order_type: Option<OrderType>,
    pub status: OrderStatus,
    pub status_badge: Badge,
    pub payment_badge: Badge,
    pub total_price: Decimal,
    pub item_count: u32,
    pub table: Option<String>,
    pub customer: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            number: order.number_label(),
            order_type: order.order_type.clone(),
            status: order.status,
            status_badge: order.status.badge(),
            payment_badge: order.payment_status.badge(),
            total_price: order.total_price,
            item_count: order.item_count(),
            table: order.table.as_ref().map(|t| t.label().to_string()),
            customer: order.customer.as_ref().and_then(|c| c.name.clone()),
            created_at: order.created_at,
        }
    }
}

/// Line item as shown on the detail screen and the kitchen board
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub label: String,
    pub kind: Option<ItemKind>,
    pub quantity: u32,
    pub inner_status: InnerStatus,
    pub badge: Badge,
    pub next_status: Option<InnerStatus>,
    #[serde(skip_serializing_if = "Customizations::is_empty")]
    pub customizations: Customizations,
    /// Surcharge of the priced extras
    #[serde(skip_serializing_if = "Decimal::is_zero")]
    pub extras_total: Decimal,
}

impl From<&shared::OrderItem> for ItemView {
    fn from(item: &shared::OrderItem) -> Self {
        Self {
            id: item.id.clone(),
            label: item.label().to_string(),
            kind: item.kind(),
            quantity: item.quantity,
            inner_status: item.inner_status,
            badge: item.inner_status.badge(),
            next_status: item.inner_status.next(),
            extras_total: item.customizations.extras_total(),
            customizations: item.customizations.clone(),
        }
    }
}

/// Order detail screen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub row: OrderRow,
    pub items: Vec<ItemView>,
    pub allowed_transitions: Vec<OrderStatus>,
    pub derived_status: Option<OrderStatus>,
}

/// Card on the kitchen board
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCard {
    pub id: String,
    pub number: String,
    pub order_type: Option<OrderType>,
    pub table: Option<String>,
    pub waiting_minutes: Option<i64>,
    pub derived_status: Option<OrderStatus>,
    pub items: Vec<ItemView>,
}

/// Active orders in one column per status, oldest first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenBoard {
    pub pending: Vec<BoardCard>,
    pub preparing: Vec<BoardCard>,
    pub ready: Vec<BoardCard>,
}

impl KitchenBoard {
    /// Lay out the active orders; inactive ones are left off the board
    pub fn build(mut orders: Vec<Order>, now: DateTime<Utc>) -> Self {
        orders.retain(|o| o.status.is_active());
        orders.sort_by_key(|o| o.created_at);

        let mut board = KitchenBoard::default();
        for order in &orders {
            let card = BoardCard {
                id: order.id.clone(),
                number: order.number_label(),
                order_type: order.order_type.clone(),
                table: order.table.as_ref().map(|t| t.label().to_string()),
                waiting_minutes: order.created_at.map(|c| (now - c).num_minutes().max(0)),
                derived_status: order.derived_status(),
                items: order.items.iter().map(ItemView::from).collect(),
            };
            match order.status {
                OrderStatus::Pending => board.pending.push(card),
                OrderStatus::Preparing => board.preparing.push(card),
                OrderStatus::Ready => board.ready.push(card),
                _ => {}
            }
        }
        board
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InnerStatusUpdate {
    inner_status: InnerStatus,
}

impl OrderService {
    pub fn new(api: BackofficeApi) -> Self {
        Self { api }
    }

    /// List orders for the order table
    pub async fn list(&self, token: &StaffToken, filter: &OrderFilter) -> AppResult<Page<OrderRow>> {
        let orders: ApiList<Order> = self.api.get(token, "order", &filter.to_pairs()).await?;
        Ok(orders.into_page().map(|o| OrderRow::from(&o)))
    }

    /// Fetch a single order
    pub async fn get(&self, token: &StaffToken, order_id: &str) -> AppResult<Order> {
        let order: ApiItem<Order> = self
            .api
            .get(token, &format!("order/{}", segment(order_id)?), &[])
            .await?;
        Ok(order.into_inner())
    }

    /// Current state of an order, bypassing the cache, before changing it
    async fn current(&self, token: &StaffToken, order_id: &str) -> AppResult<Order> {
        let order: ApiItem<Order> = self
            .api
            .get_fresh(token, &format!("order/{}", segment(order_id)?))
            .await?;
        Ok(order.into_inner())
    }

    pub async fn detail(&self, token: &StaffToken, order_id: &str) -> AppResult<OrderDetail> {
        let order = self.get(token, order_id).await?;
        Ok(OrderDetail {
            row: OrderRow::from(&order),
            items: order.items.iter().map(ItemView::from).collect(),
            allowed_transitions: OrderStatus::ALL
                .into_iter()
                .filter(|s| order.status.can_transition_to(*s))
                .collect(),
            derived_status: order.derived_status(),
        })
    }

    /// Orders in a date range, as returned by the report endpoint
    pub async fn report(
        &self,
        token: &StaffToken,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
    ) -> AppResult<Vec<Order>> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        let orders: ApiList<Order> = self.api.get(token, "order/report", &query).await?;
        Ok(orders.into_vec())
    }

    /// Active orders of a kitchen laid out as the kitchen board
    pub async fn kitchen_board(
        &self,
        token: &StaffToken,
        kitchen: Option<String>,
    ) -> AppResult<KitchenBoard> {
        let filter = OrderFilter {
            kitchen,
            ..Default::default()
        };
        let orders: Vec<Order> = self.api.get_all(token, "order", &filter.to_pairs()).await?;
        Ok(KitchenBoard::build(orders, Utc::now()))
    }

    /// Cancel an order: one `PUT order/{id}` with `{"status":"cancelled"}`
    pub async fn cancel(&self, token: &StaffToken, order_id: &str) -> AppResult<serde_json::Value> {
        let order = self.current(token, order_id).await?;
        if !order.status.can_transition_to(OrderStatus::Cancelled) {
            return Err(AppError::InvalidStateTransition(format!(
                "Order {} is {} and can no longer be cancelled",
                order.number_label(),
                order.status
            )));
        }

        tracing::info!("Cancelling order {}", order_id);
        self.api
            .put(
                token,
                &format!("order/{}", segment(order_id)?),
                &StatusUpdate {
                    status: OrderStatus::Cancelled,
                },
            )
            .await
    }

    /// Move an order to another status
    pub async fn update_status(
        &self,
        token: &StaffToken,
        order_id: &str,
        target: OrderStatus,
    ) -> AppResult<serde_json::Value> {
        if target == OrderStatus::Cancelled {
            return self.cancel(token, order_id).await;
        }

        let order = self.current(token, order_id).await?;
        validate_order_transition(order.status, target)
            .map_err(|e| AppError::InvalidStateTransition(e.message))?;

        self.api
            .patch(
                token,
                &format!("order/{}/status", segment(order_id)?),
                &StatusUpdate { status: target },
            )
            .await
    }

    /// Advance one line item; without a target the item moves one step forward
    pub async fn advance_item(
        &self,
        token: &StaffToken,
        order_id: &str,
        item_id: &str,
        target: Option<InnerStatus>,
    ) -> AppResult<serde_json::Value> {
        let order = self.current(token, order_id).await?;
        if order.status.is_terminal() {
            return Err(AppError::InvalidStateTransition(format!(
                "Order {} is already {}",
                order.number_label(),
                order.status
            )));
        }
        let item = order
            .find_item(item_id)
            .ok_or_else(|| AppError::NotFound("Order item".to_string()))?;

        let target = match target.or_else(|| item.inner_status.next()) {
            Some(target) => target,
            None => {
                return Err(AppError::InvalidStateTransition(format!(
                    "{} is already completed",
                    item.label()
                )))
            }
        };
        validate_inner_transition(item.inner_status, target)
            .map_err(|e| AppError::InvalidStateTransition(e.message))?;

        self.api
            .patch(
                token,
                &format!("order/{}/item/{}/status", segment(order_id)?, segment(item_id)?),
                &InnerStatusUpdate {
                    inner_status: target,
                },
            )
            .await
    }

    /// Merge several open orders into one
    pub async fn merge(&self, token: &StaffToken, order_ids: Vec<String>) -> AppResult<serde_json::Value> {
        let mut seen = HashSet::new();
        let order_ids: Vec<String> = order_ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect();
        if order_ids.len() < 2 {
            return Err(AppError::Validation {
                field: "orderIds".to_string(),
                message: "Select at least two different orders to merge".to_string(),
            });
        }

        self.api
            .post(token, "order/merge", &MergeOrders { order_ids })
            .await
    }

    pub async fn checkout(
        &self,
        token: &StaffToken,
        order_id: &str,
        body: Checkout,
    ) -> AppResult<serde_json::Value> {
        let order = self.current(token, order_id).await?;
        if order.status.is_terminal() {
            return Err(AppError::InvalidStateTransition(format!(
                "Order {} is already {}",
                order.number_label(),
                order.status
            )));
        }
        if let Some(paid) = body.paid_amount {
            if paid < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "paidAmount".to_string(),
                    message: "Paid amount cannot be negative".to_string(),
                });
            }
        }

        self.api
            .post(token, &format!("order/{}/checkout", segment(order_id)?), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(id: &str, status: &str, minute: u32) -> Order {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "OrderNumber": id,
            "status": status,
            "items": [{"_id": "i1", "product": "p1", "quantity": 1, "innerStatus": "pending"}],
            "createdAt": Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap()
        }))
        .unwrap()
    }

    #[test]
    fn board_groups_active_orders_oldest_first() {
        let orders = vec![
            order("b", "pending", 10),
            order("a", "pending", 5),
            order("c", "ready", 1),
            order("d", "completed", 0),
            order("e", "cancelled", 0),
        ];
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        let board = KitchenBoard::build(orders, now);

        let pending: Vec<&str> = board.pending.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(pending, vec!["a", "b"]);
        assert_eq!(board.pending[0].waiting_minutes, Some(25));
        assert!(board.preparing.is_empty());
        assert_eq!(board.ready.len(), 1);
    }

    #[test]
    fn filter_pairs_include_order_type() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Ready),
            order_type: Some("delivery".into()),
            ..Default::default()
        };
        assert_eq!(
            filter.to_pairs(),
            vec![
                ("status", "ready".to_string()),
                ("orderType", "delivery".to_string())
            ]
        );
    }
}
