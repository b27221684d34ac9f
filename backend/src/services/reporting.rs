//! Reporting service: dashboard metrics and the order report export

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{Badged, InventoryItem, InventorySummary, Order, OrderStatus};

use crate::error::{AppError, AppResult};
use crate::middleware::StaffToken;
use crate::services::{InventoryService, OrderService};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    orders: OrderService,
    inventory: InventoryService,
}

/// Dashboard metrics
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_orders: usize,
    /// Orders still in the kitchen, keyed by status
    pub active_orders: BTreeMap<OrderStatus, usize>,
    pub cancelled_orders: usize,
    /// Revenue of completed and checked-out orders
    pub revenue: Decimal,
    pub inventory: InventorySummary,
    /// Low and out-of-stock items waiting for a reorder
    pub stock_alerts: usize,
}

impl DashboardMetrics {
    pub fn compute(orders: &[Order], items: &[InventoryItem]) -> Self {
        let mut active_orders = BTreeMap::new();
        let mut cancelled_orders = 0;
        let mut revenue = Decimal::ZERO;

        for order in orders {
            match order.status {
                status if status.is_active() => *active_orders.entry(status).or_insert(0) += 1,
                OrderStatus::Completed | OrderStatus::Checkout => {
                    revenue = revenue.saturating_add(order.total_price)
                }
                OrderStatus::Cancelled => cancelled_orders += 1,
                _ => {}
            }
        }

        let inventory = InventorySummary::from_items(items);
        Self {
            total_orders: orders.len(),
            active_orders,
            cancelled_orders,
            revenue,
            stock_alerts: inventory.attention_count(),
            inventory,
        }
    }
}

/// Report filter parameters
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn validate(&self) -> AppResult<()> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(AppError::Validation {
                field: "from".to_string(),
                message: "Start date must be before end date".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// One line of the order report, flat so it exports to CSV
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReportRow {
    pub order_number: String,
    pub created_at: String,
    pub order_type: String,
    pub status: String,
    pub payment: String,
    pub items: u32,
    pub total_price: Decimal,
}

impl From<&Order> for OrderReportRow {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.number_label(),
            created_at: order
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            order_type: order
                .order_type
                .as_ref()
                .and_then(|t| serde_json::to_value(t).ok())
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            status: order.status.to_string(),
            payment: order.payment_status.badge().label,
            items: order.item_count(),
            total_price: order.total_price,
        }
    }
}

impl ReportingService {
    pub fn new(orders: OrderService, inventory: InventoryService) -> Self {
        Self { orders, inventory }
    }

    /// Get dashboard metrics
    pub async fn dashboard(&self, token: &StaffToken, filter: &ReportFilter) -> AppResult<DashboardMetrics> {
        filter.validate()?;
        let (orders, items) = tokio::try_join!(
            self.orders.report(token, filter.from, filter.to),
            self.inventory.all_items(token),
        )?;
        Ok(DashboardMetrics::compute(&orders, &items))
    }

    /// Order report rows, oldest first
    pub async fn order_report(&self, token: &StaffToken, filter: &ReportFilter) -> AppResult<Vec<OrderReportRow>> {
        filter.validate()?;
        let mut orders = self.orders.report(token, filter.from, filter.to).await?;
        orders.sort_by_key(|o| o.created_at);
        Ok(orders.iter().map(OrderReportRow::from).collect())
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, status: &str, total: u32) -> Order {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "OrderNumber": 100,
            "orderType": "dine-in",
            "status": status,
            "totalPrice": total,
            "items": [],
        }))
        .unwrap()
    }

    #[test]
    fn metrics_split_orders_by_status() {
        let orders = vec![
            order("a", "pending", 10),
            order("b", "preparing", 12),
            order("c", "pending", 8),
            order("d", "completed", 20),
            order("e", "checkout", 5),
            order("f", "cancelled", 99),
        ];
        let metrics = DashboardMetrics::compute(&orders, &[]);
        assert_eq!(metrics.total_orders, 6);
        assert_eq!(metrics.active_orders.get(&OrderStatus::Pending), Some(&2));
        assert_eq!(metrics.active_orders.get(&OrderStatus::Preparing), Some(&1));
        assert_eq!(metrics.cancelled_orders, 1);
        assert_eq!(metrics.revenue, Decimal::from(25));
    }

    #[test]
    fn stock_alerts_count_low_and_out_of_stock() {
        let items: Vec<InventoryItem> = serde_json::from_value(serde_json::json!([
            {"_id": "i1", "productName": "Flour", "quantity": 40, "status": "in-stock", "totalValue": 80},
            {"_id": "i2", "productName": "Eggs", "quantity": 3, "status": "low-stock", "totalValue": 6},
            {"_id": "i3", "productName": "Basil", "quantity": 0, "status": "out-of-stock", "totalValue": 0}
        ]))
        .unwrap();
        let metrics = DashboardMetrics::compute(&[], &items);
        assert_eq!(metrics.stock_alerts, 2);
        assert_eq!(metrics.inventory.total_value, Decimal::from(86));
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let rows: Vec<OrderReportRow> = [order("a", "completed", 20)]
            .iter()
            .map(OrderReportRow::from)
            .collect();
        let csv = ReportingService::export_to_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("orderNumber,createdAt,orderType,status,payment,items,totalPrice")
        );
        assert_eq!(lines.next(), Some("100,,dine-in,completed,Unpaid,0,20"));
    }

    #[test]
    fn rejects_inverted_range() {
        let filter = ReportFilter {
            from: NaiveDate::from_ymd_opt(2024, 3, 2),
            to: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        assert!(filter.validate().is_err());
    }
}
