pub mod api;
pub mod dashboard;
pub mod export;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(dashboard::index))
        .route("/inventory", get(dashboard::inventory))
        // Edits
        .route(
            "/products/:id/remaining",
            post(dashboard::update_remaining_stock),
        )
        .route("/products/:id/field", post(dashboard::update_field))
        .route("/edit-mode", post(dashboard::toggle_edit_mode))
        // Export
        .route("/export", get(export::download))
        // API (JSON)
        .route("/api/products", get(api::products))
        .route("/api/summary", get(api::summary))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
