//! Reducer-style form state for the purchase and transfer screens
//!
//! Forms hold transient, in-memory state only. `reduce` applies one user
//! action; `to_request` either yields the request body or the first
//! validation failure, so an invalid form never produces a network call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CreateTransfer, PurchaseItemInput, PurchaseRequest};
use crate::validation::{validate_purchase, validate_transfer_quantity, FieldError};

// ============================================================================
// Purchase Form
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub inventory_id: String,
    pub price: Decimal,
    pub quantity: Decimal,
}

impl PurchaseLine {
    pub fn total(&self) -> Decimal {
        self.price.saturating_mul(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum PurchaseAction {
    SetTitle(String),
    SetSupplier(Option<String>),
    #[serde(rename_all = "camelCase")]
    AddItem { inventory_id: String },
    RemoveItem(usize),
    SetPrice(usize, Decimal),
    SetQuantity(usize, Decimal),
    SetPaidAmount(Decimal),
    Reset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseForm {
    pub title: String,
    pub supplier: Option<String>,
    pub items: Vec<PurchaseLine>,
    pub paid_amount: Decimal,
}

impl PurchaseForm {
    pub fn reduce(&mut self, action: PurchaseAction) {
        match action {
            PurchaseAction::SetTitle(title) => self.title = title,
            PurchaseAction::SetSupplier(supplier) => self.supplier = supplier,
            PurchaseAction::AddItem { inventory_id } => {
                // Picking an item already on the form bumps its quantity instead
                if let Some(line) = self.items.iter_mut().find(|l| l.inventory_id == inventory_id) {
                    line.quantity = line.quantity.saturating_add(Decimal::ONE);
                } else {
                    self.items.push(PurchaseLine {
                        inventory_id,
                        price: Decimal::ZERO,
                        quantity: Decimal::ONE,
                    });
                }
            }
            PurchaseAction::RemoveItem(index) => {
                if index < self.items.len() {
                    self.items.remove(index);
                }
            }
            PurchaseAction::SetPrice(index, price) => {
                if let Some(line) = self.items.get_mut(index) {
                    line.price = price;
                }
            }
            PurchaseAction::SetQuantity(index, quantity) => {
                if let Some(line) = self.items.get_mut(index) {
                    line.quantity = quantity;
                }
            }
            PurchaseAction::SetPaidAmount(amount) => self.paid_amount = amount,
            PurchaseAction::Reset => *self = Self::default(),
        }
    }

    pub fn grand_total(&self) -> Decimal {
        self.items
            .iter()
            .map(PurchaseLine::total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn balance_due(&self) -> Decimal {
        self.grand_total().saturating_sub(self.paid_amount)
    }

    fn lines(&self) -> Vec<PurchaseItemInput> {
        self.items
            .iter()
            .map(|line| PurchaseItemInput {
                inventory_id: line.inventory_id.clone(),
                price: line.price,
                quantity: line.quantity,
                total: line.total(),
            })
            .collect()
    }

    /// Every failing field, for inline form messages
    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if let Err(e) = validate_purchase(&self.lines(), self.paid_amount) {
            errors.push(e);
        }
        errors
    }

    pub fn to_request(&self) -> Result<PurchaseRequest, FieldError> {
        if let Some(first) = self.errors().into_iter().next() {
            return Err(first);
        }
        let items = self.lines();
        Ok(PurchaseRequest {
            title: self.title.trim().to_string(),
            supplier: self.supplier.clone(),
            items,
            paid_amount: self.paid_amount,
        })
    }
}

// ============================================================================
// Transfer Form
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum TransferAction {
    SelectInventory { id: String, available: Decimal },
    SelectKitchen(String),
    SetQuantity(Decimal),
    SetNotes(String),
    Reset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferForm {
    pub main_inventory_id: Option<String>,
    pub available: Decimal,
    pub kitchen_id: Option<String>,
    pub quantity: Decimal,
    pub notes: String,
}

impl TransferForm {
    pub fn reduce(&mut self, action: TransferAction) {
        match action {
            TransferAction::SelectInventory { id, available } => {
                self.main_inventory_id = Some(id);
                self.available = available;
                // Keep the typed quantity; it is re-checked against the new stock
            }
            TransferAction::SelectKitchen(id) => self.kitchen_id = Some(id),
            TransferAction::SetQuantity(quantity) => self.quantity = quantity,
            TransferAction::SetNotes(notes) => self.notes = notes,
            TransferAction::Reset => *self = Self::default(),
        }
    }

    pub fn to_request(&self) -> Result<CreateTransfer, FieldError> {
        let main_inventory_id = self
            .main_inventory_id
            .clone()
            .ok_or_else(|| FieldError::new("mainInventoryId", "Select an inventory item"))?;
        let kitchen_id = self
            .kitchen_id
            .clone()
            .ok_or_else(|| FieldError::new("kitchenId", "Select a kitchen"))?;
        validate_transfer_quantity(self.quantity, self.available)?;

        let notes = self.notes.trim();
        Ok(CreateTransfer {
            main_inventory_id,
            kitchen_id,
            quantity: self.quantity,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}
