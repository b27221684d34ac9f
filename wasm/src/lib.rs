//! WebAssembly module for the restaurant back-office dashboard
//!
//! Runs the form reducers and validators in the browser, so an invalid
//! purchase or transfer form is rejected before any request is issued.
//! State and actions cross the boundary as JSON strings.

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

pub use shared::forms::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("back-office forms ready"));
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn field_error_json(err: &FieldError) -> String {
    serde_json::to_string(err).unwrap_or_else(|_| err.message.clone())
}

fn decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

// ============================================================================
// Purchase form
// ============================================================================

fn reduce_purchase(state_json: &str, action_json: &str) -> Result<String, String> {
    let mut form: PurchaseForm = if state_json.trim().is_empty() {
        PurchaseForm::default()
    } else {
        parse(state_json, "purchase form")?
    };
    let action: PurchaseAction = parse(action_json, "purchase action")?;
    form.reduce(action);
    to_json(&form)
}

fn purchase_request(state_json: &str) -> Result<String, String> {
    let form: PurchaseForm = parse(state_json, "purchase form")?;
    let request = form.to_request().map_err(|e| field_error_json(&e))?;
    to_json(&request)
}

/// Apply one action to the purchase form state and return the new state
#[wasm_bindgen]
pub fn reduce_purchase_form(state_json: &str, action_json: &str) -> Result<String, JsValue> {
    reduce_purchase(state_json, action_json).map_err(|e| JsValue::from_str(&e))
}

/// Request body for the purchase form, or the first field error as JSON
#[wasm_bindgen]
pub fn purchase_form_request(state_json: &str) -> Result<String, JsValue> {
    purchase_request(state_json).map_err(|e| JsValue::from_str(&e))
}

/// Grand total of a purchase form
#[wasm_bindgen]
pub fn purchase_grand_total(state_json: &str) -> f64 {
    parse::<PurchaseForm>(state_json, "purchase form")
        .map(|form| form.grand_total().to_string().parse().unwrap_or(0.0))
        .unwrap_or(0.0)
}

// ============================================================================
// Transfer form
// ============================================================================

fn reduce_transfer(state_json: &str, action_json: &str) -> Result<String, String> {
    let mut form: TransferForm = if state_json.trim().is_empty() {
        TransferForm::default()
    } else {
        parse(state_json, "transfer form")?
    };
    let action: TransferAction = parse(action_json, "transfer action")?;
    form.reduce(action);
    to_json(&form)
}

fn transfer_request(state_json: &str) -> Result<String, String> {
    let form: TransferForm = parse(state_json, "transfer form")?;
    let request = form.to_request().map_err(|e| field_error_json(&e))?;
    to_json(&request)
}

#[wasm_bindgen]
pub fn reduce_transfer_form(state_json: &str, action_json: &str) -> Result<String, JsValue> {
    reduce_transfer(state_json, action_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn transfer_form_request(state_json: &str) -> Result<String, JsValue> {
    transfer_request(state_json).map_err(|e| JsValue::from_str(&e))
}

/// Error message for a transfer quantity, or `None` when it can be sent
#[wasm_bindgen]
pub fn check_transfer_quantity(requested: f64, available: f64) -> Option<String> {
    validate_transfer_quantity(decimal(requested), decimal(available))
        .err()
        .map(|e| e.message)
}

// ============================================================================
// Field checks and badges
// ============================================================================

#[wasm_bindgen]
pub fn check_email(email: &str) -> Option<String> {
    validate_email(email).err().map(str::to_string)
}

#[wasm_bindgen]
pub fn check_supplier_code(code: &str) -> Option<String> {
    validate_supplier_code(code).err().map(str::to_string)
}

fn badge_for<T: DeserializeOwned + Badged>(status: &str) -> Option<String> {
    serde_json::from_value::<T>(serde_json::Value::String(status.to_string()))
        .ok()
        .and_then(|s| serde_json::to_string(&s.badge()).ok())
}

/// Badge JSON for an inventory stock status such as `low-stock`
#[wasm_bindgen]
pub fn stock_status_badge(status: &str) -> Option<String> {
    badge_for::<StockStatus>(status)
}

/// Badge JSON for an order status such as `preparing`
#[wasm_bindgen]
pub fn order_status_badge(status: &str) -> Option<String> {
    badge_for::<OrderStatus>(status)
}

/// The step a line item moves to next, or `None` once completed
#[wasm_bindgen]
pub fn next_inner_status(current: &str) -> Option<String> {
    serde_json::from_value::<InnerStatus>(serde_json::Value::String(current.to_string()))
        .ok()
        .and_then(|s| s.next())
        .map(|s| s.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_form_round_trip_through_json() {
        let state = reduce_purchase("", r#"{"type":"setTitle","payload":"Dairy"}"#).unwrap();
        let state =
            reduce_purchase(&state, r#"{"type":"addItem","payload":{"inventoryId":"milk"}}"#).unwrap();
        let state = reduce_purchase(&state, r#"{"type":"setPrice","payload":[0, 1.25]}"#).unwrap();
        let state = reduce_purchase(&state, r#"{"type":"setQuantity","payload":[0, 4]}"#).unwrap();

        assert!((purchase_grand_total(&state) - 5.0).abs() < 1e-9);
        let request: serde_json::Value =
            serde_json::from_str(&purchase_request(&state).unwrap()).unwrap();
        assert_eq!(request["items"][0]["total"], serde_json::json!(5.0));
    }

    #[test]
    fn invalid_purchase_reports_field() {
        let state = reduce_purchase("", r#"{"type":"setTitle","payload":"Empty"}"#).unwrap();
        let err = purchase_request(&state).unwrap_err();
        let err: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(err["field"], "items");
    }

    #[test]
    fn transfer_over_available_is_rejected() {
        let mut state = String::new();
        for action in [
            r#"{"type":"selectInventory","payload":{"id":"rice","available":10}}"#,
            r#"{"type":"selectKitchen","payload":"k1"}"#,
            r#"{"type":"setQuantity","payload":11}"#,
        ] {
            state = reduce_transfer(&state, action).unwrap();
        }
        assert!(transfer_request(&state).unwrap_err().contains("10 available"));
        assert_eq!(
            check_transfer_quantity(11.0, 10.0).as_deref(),
            Some("Quantity exceeds available stock (10 available)")
        );
        assert_eq!(check_transfer_quantity(2.5, 10.0), None);
    }

    #[test]
    fn badges_and_steps() {
        let badge: serde_json::Value =
            serde_json::from_str(&stock_status_badge("low-stock").unwrap()).unwrap();
        assert_eq!(badge["label"], "Low stock");
        assert_eq!(stock_status_badge("plenty"), None);
        assert_eq!(next_inner_status("pending").as_deref(), Some("preparing"));
        assert_eq!(next_inner_status("completed"), None);
        assert_eq!(check_supplier_code("ab"), Some("Supplier code must be uppercase alphanumeric only".to_string()));
    }
}
