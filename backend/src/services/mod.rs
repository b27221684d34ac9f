//! Business logic services, one per dashboard screen family

pub mod catalog;
pub mod inventory;
pub mod orders;
pub mod purchases;
pub mod recipes;
pub mod reporting;
pub mod sub_inventory;
pub mod suppliers;

pub use catalog::CatalogService;
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use purchases::PurchaseService;
pub use recipes::RecipeService;
pub use reporting::ReportingService;
pub use sub_inventory::SubInventoryService;
pub use suppliers::SupplierService;
