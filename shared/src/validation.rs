//! Client-side validation for dashboard forms
//!
//! Everything here runs before a request leaves the browser or the gateway.
//! The remote API re-validates; these checks only spare a round trip.

use std::borrow::Cow;
use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationError;

use crate::models::{checked_grand_total, IngredientInput, InnerStatus, OrderStatus, PurchaseItemInput};

/// A form validation failure tied to one field
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type FieldResult = Result<(), FieldError>;

// ============================================================================
// Inventory Transfers
// ============================================================================

/// Validate a transfer quantity against the main inventory's available stock
pub fn validate_transfer_quantity(requested: Decimal, available: Decimal) -> FieldResult {
    if requested <= Decimal::ZERO {
        return Err(FieldError::new("quantity", "Quantity must be greater than 0"));
    }
    if requested > available {
        return Err(FieldError::new(
            "quantity",
            format!(
                "Quantity exceeds available stock ({} available)",
                available.normalize()
            ),
        ));
    }
    Ok(())
}

// ============================================================================
// Purchases
// ============================================================================

/// Validate purchase lines and the paid amount
pub fn validate_purchase(items: &[PurchaseItemInput], paid_amount: Decimal) -> FieldResult {
    if items.is_empty() {
        return Err(FieldError::new("items", "Add at least one item"));
    }
    for (index, item) in items.iter().enumerate() {
        if item.inventory_id.trim().is_empty() {
            return Err(FieldError::new(
                format!("items[{}].inventoryId", index),
                "Select an inventory item",
            ));
        }
        if item.price < Decimal::ZERO {
            return Err(FieldError::new(
                format!("items[{}].price", index),
                "Price cannot be negative",
            ));
        }
        if item.quantity <= Decimal::ZERO {
            return Err(FieldError::new(
                format!("items[{}].quantity", index),
                "Quantity must be greater than 0",
            ));
        }
    }
    if paid_amount < Decimal::ZERO {
        return Err(FieldError::new("paidAmount", "Paid amount cannot be negative"));
    }
    let grand_total = checked_grand_total(items.iter().map(|i| (i.price, i.quantity)))
        .map_err(|index| FieldError::new(format!("items[{}].price", index), "Amount is too large"))?;
    if paid_amount > grand_total {
        return Err(FieldError::new(
            "paidAmount",
            "Paid amount cannot exceed the grand total",
        ));
    }
    Ok(())
}

// ============================================================================
// Recipes
// ============================================================================

/// Validate recipe ingredient lines
pub fn validate_recipe_ingredients(ingredients: &[IngredientInput]) -> FieldResult {
    if ingredients.is_empty() {
        return Err(FieldError::new("ingredients", "Add at least one ingredient"));
    }
    let mut seen = HashSet::new();
    for (index, line) in ingredients.iter().enumerate() {
        if line.ingredient.trim().is_empty() {
            return Err(FieldError::new(
                format!("ingredients[{}].ingredient", index),
                "Select an ingredient",
            ));
        }
        if line.quantity <= Decimal::ZERO {
            return Err(FieldError::new(
                format!("ingredients[{}].quantity", index),
                "Quantity must be greater than 0",
            ));
        }
        if !seen.insert((line.ingredient_type, line.ingredient.as_str())) {
            return Err(FieldError::new(
                format!("ingredients[{}].ingredient", index),
                "Ingredient is listed twice",
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Orders
// ============================================================================

pub fn validate_order_transition(from: OrderStatus, to: OrderStatus) -> FieldResult {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(FieldError::new(
            "status",
            format!("Cannot move an order from {} to {}", from, to),
        ))
    }
}

pub fn validate_inner_transition(from: InnerStatus, to: InnerStatus) -> FieldResult {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(FieldError::new(
            "innerStatus",
            format!("Cannot move an item from {} back to {}", from, to),
        ))
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format with the same rule as `#[validate(email)]` inputs
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if validator::validate_email(email) {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate supplier code format (2-20 uppercase alphanumeric or '-')
pub fn validate_supplier_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 {
        return Err("Supplier code must be at least 2 characters");
    }
    if code.len() > 20 {
        return Err("Supplier code must be at most 20 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Supplier code must be uppercase alphanumeric only");
    }
    Ok(())
}

// ============================================================================
// `validator` adapters
// ============================================================================

pub fn validate_supplier_code_field(code: &str) -> Result<(), ValidationError> {
    validate_supplier_code(code).map_err(|msg| {
        let mut err = ValidationError::new("supplier_code");
        err.message = Some(Cow::Borrowed(msg));
        err
    })
}

pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some(Cow::Borrowed("Value cannot be negative"));
        return Err(err);
    }
    Ok(())
}

/// First human-readable message out of a `validator` error set
pub fn first_message(errors: &validator::ValidationErrors) -> FieldError {
    errors
        .field_errors()
        .into_iter()
        .next()
        .and_then(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.to_string(), message)
            })
        })
        .unwrap_or_else(|| FieldError::new("form", "Invalid input"))
}
