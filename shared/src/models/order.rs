//! Kitchen order models and the status machines the dashboard drives

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Badge, Badged, Tone};

/// Order-level status, an aggregate maintained by the order service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
    Checkout,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Checkout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Checkout => "checkout",
        }
    }

    /// Orders still on the kitchen board
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Transitions the dashboard is allowed to request
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Preparing)
                | (Pending, Cancelled)
                | (Preparing, Ready)
                | (Preparing, Cancelled)
                | (Ready, Completed)
                | (Ready, Checkout)
                | (Ready, Cancelled)
                | (Checkout, Completed)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status '{}'", s))
    }
}

impl Badged for OrderStatus {
    fn badge(&self) -> Badge {
        let tone = match self {
            OrderStatus::Pending => Tone::Warning,
            OrderStatus::Preparing => Tone::Info,
            OrderStatus::Ready => Tone::Success,
            OrderStatus::Completed => Tone::Neutral,
            OrderStatus::Cancelled => Tone::Danger,
            OrderStatus::Checkout => Tone::Info,
        };
        Badge::new(capitalize(self.as_str()), tone)
    }
}

/// Per-item kitchen preparation state
///
/// Progression is monotonic: pending → preparing → ready → completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum InnerStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl InnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InnerStatus::Pending => "pending",
            InnerStatus::Preparing => "preparing",
            InnerStatus::Ready => "ready",
            InnerStatus::Completed => "completed",
        }
    }

    pub fn next(&self) -> Option<InnerStatus> {
        match self {
            InnerStatus::Pending => Some(InnerStatus::Preparing),
            InnerStatus::Preparing => Some(InnerStatus::Ready),
            InnerStatus::Ready => Some(InnerStatus::Completed),
            InnerStatus::Completed => None,
        }
    }

    /// Only forward moves are allowed; skipping ahead is fine
    pub fn can_transition_to(&self, target: InnerStatus) -> bool {
        target > *self
    }
}

impl std::fmt::Display for InnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Badged for InnerStatus {
    fn badge(&self) -> Badge {
        let tone = match self {
            InnerStatus::Pending => Tone::Warning,
            InnerStatus::Preparing => Tone::Info,
            InnerStatus::Ready => Tone::Success,
            InnerStatus::Completed => Tone::Neutral,
        };
        Badge::new(capitalize(self.as_str()), tone)
    }
}

/// How the order is served
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderType {
    #[serde(rename = "dine-in", alias = "dineIn", alias = "dine_in")]
    DineIn,
    #[serde(rename = "takeaway", alias = "takeAway", alias = "take-away")]
    Takeaway,
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(other)]
    Other,
}

/// Payment state as reported by the order service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Partial,
    Refunded,
    #[serde(other)]
    Other,
}

impl Badged for PaymentStatus {
    fn badge(&self) -> Badge {
        match self {
            PaymentStatus::Pending => Badge::new("Unpaid", Tone::Warning),
            PaymentStatus::Paid => Badge::new("Paid", Tone::Success),
            PaymentStatus::Partial => Badge::new("Partially paid", Tone::Info),
            PaymentStatus::Refunded => Badge::new("Refunded", Tone::Neutral),
            PaymentStatus::Other => Badge::new("Unknown", Tone::Neutral),
        }
    }
}

/// A reference that may arrive either as a bare id or as a populated document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Ref {
    Id(String),
    Populated(RefDoc),
}

/// Minimal populated document: enough to label a row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RefDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(alias = "productName", alias = "title")]
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

impl Ref {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(doc) => &doc.id,
        }
    }

    /// Display name, falling back to the id when the reference is not populated
    pub fn label(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(doc) => doc.name.as_deref().unwrap_or(&doc.id),
        }
    }
}

/// Extra with its surcharge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricedExtra {
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Customizations {
    pub extras: Vec<String>,
    pub removals: Vec<String>,
    pub extras_with_prices: Vec<PricedExtra>,
}

impl Customizations {
    pub fn is_empty(&self) -> bool {
        self.extras.is_empty() && self.removals.is_empty() && self.extras_with_prices.is_empty()
    }

    pub fn extras_total(&self) -> Decimal {
        self.extras_with_prices
            .iter()
            .map(|e| e.price)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// What a line item points at
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Product,
    CustomProduct,
    Offer,
}

/// A line item of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub product: Option<Ref>,
    #[serde(default)]
    pub custom_product: Option<Ref>,
    #[serde(default)]
    pub offer: Option<Ref>,
    pub quantity: u32,
    #[serde(default)]
    pub inner_status: InnerStatus,
    #[serde(default)]
    pub customizations: Customizations,
}

impl OrderItem {
    pub fn kind(&self) -> Option<ItemKind> {
        if self.product.is_some() {
            Some(ItemKind::Product)
        } else if self.custom_product.is_some() {
            Some(ItemKind::CustomProduct)
        } else if self.offer.is_some() {
            Some(ItemKind::Offer)
        } else {
            None
        }
    }

    pub fn reference(&self) -> Option<&Ref> {
        self.product
            .as_ref()
            .or(self.custom_product.as_ref())
            .or(self.offer.as_ref())
    }

    pub fn label(&self) -> &str {
        self.reference().map(Ref::label).unwrap_or("Unknown item")
    }
}

/// Customer details attached to delivery/takeaway orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// An order as returned by the order service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "OrderNumber", alias = "orderNumber", default)]
    pub order_number: serde_json::Value,
    pub order_type: Option<OrderType>,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub total_price: Decimal,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub table: Option<Ref>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Order number as displayed; the API sends it as a number or a string
    pub fn number_label(&self) -> String {
        match &self.order_number {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// The aggregate status implied by the item inner statuses
    ///
    /// Returns `None` for orders without items. The order service value stays
    /// authoritative; this is only a display hint on the kitchen board.
    pub fn derived_status(&self) -> Option<OrderStatus> {
        let slowest = self.items.iter().map(|item| item.inner_status).min()?;
        let fastest = self.items.iter().map(|item| item.inner_status).max()?;
        Some(match slowest {
            InnerStatus::Completed => OrderStatus::Completed,
            InnerStatus::Ready => OrderStatus::Ready,
            _ if fastest >= InnerStatus::Preparing => OrderStatus::Preparing,
            _ => OrderStatus::Pending,
        })
    }

    pub fn find_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// Body of a status patch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate<S> {
    pub status: S,
}

/// Body of an order merge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MergeOrders {
    pub order_ids: Vec<String>,
}

/// Body of a checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub paid_amount: Option<Decimal>,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
