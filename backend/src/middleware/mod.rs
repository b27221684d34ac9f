//! Request middleware and extractors

pub mod auth;

pub use auth::{StaffToken, TOKEN_HEADER};
