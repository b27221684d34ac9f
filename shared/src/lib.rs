//! Shared types and models for the restaurant back-office dashboard
//!
//! This crate contains the typed view of the remote back-office API shared
//! between the dashboard gateway, the browser (via WASM), and tests.

pub mod forms;
pub mod models;
pub mod types;
pub mod validation;

pub use forms::*;
pub use models::*;
pub use types::*;
pub use validation::*;
