//! Domain models for the restaurant back-office dashboard

mod batch;
mod catalog;
mod inventory;
mod order;
mod purchase;
mod recipe;
mod supplier;
mod transfer;

pub use batch::*;
pub use catalog::*;
pub use inventory::*;
pub use order::*;
pub use purchase::*;
pub use recipe::*;
pub use supplier::*;
pub use transfer::*;
