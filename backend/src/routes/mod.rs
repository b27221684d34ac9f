//! Route definitions for the restaurant back-office dashboard
//!
//! Every route requires the staff `token` header; the `StaffToken` extractor
//! rejects requests without one.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/orders", order_routes())
        .nest("/inventory", inventory_routes())
        .nest("/sub-inventory", sub_inventory_routes())
        .nest("/purchases", purchase_routes())
        .nest("/recipes", recipe_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/staff", staff_routes())
        .route("/kitchens", get(handlers::list_kitchens))
        .nest("/catalog", catalog_routes())
        .nest("/reports", report_routes())
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders))
        .route("/board", get(handlers::get_kitchen_board))
        .route("/merge", post(handlers::merge_orders))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/cancel", post(handlers::cancel_order))
        .route("/:order_id/status", patch(handlers::update_order_status))
        .route(
            "/:order_id/items/:item_id/status",
            patch(handlers::update_item_status),
        )
        .route("/:order_id/checkout", post(handlers::checkout_order))
}

fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventory).post(handlers::create_inventory_item),
        )
        .route("/summary", get(handlers::get_inventory_summary))
        .route(
            "/:item_id",
            get(handlers::get_inventory_item)
                .put(handlers::update_inventory_item)
                .delete(handlers::delete_inventory_item),
        )
}

fn sub_inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", post(handlers::create_transfer))
        .route("/history", get(handlers::get_transfer_history))
        .route("/kitchens/:kitchen_id", get(handlers::get_kitchen_stock))
        .route(
            "/kitchens/:kitchen_id/batches/:inventory_id",
            get(handlers::get_batches),
        )
}

fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_purchases).post(handlers::create_purchase))
        .route(
            "/:purchase_id",
            get(handlers::get_purchase)
                .put(handlers::update_purchase)
                .delete(handlers::delete_purchase),
        )
}

fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_recipes).post(handlers::create_recipe))
        .route(
            "/:recipe_id",
            get(handlers::get_recipe)
                .put(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .route("/:recipe_id/active", patch(handlers::set_recipe_active))
}

fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route("/options", get(handlers::supplier_options))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
}

fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_staff).post(handlers::create_staff))
        .route(
            "/:staff_id",
            put(handlers::update_staff).delete(handlers::delete_staff),
        )
}

/// Reference data: `/catalog/{kitchen|category|sub-category|product|...}`
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:resource",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/:resource/:id",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/orders", get(handlers::get_order_report))
}
