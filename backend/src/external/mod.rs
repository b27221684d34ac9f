//! External API integrations

pub mod client;

pub use client::{segment, BackofficeApi};
