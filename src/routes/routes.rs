//! Defines routes for the cellar API.
//!
//! ## Structure
//! - **Collection endpoints**
//!   - `GET    /cellar/accounts/{account_id}/bottles` — list an account's bottles
//!   - `POST   /cellar/accounts/{account_id}/bottles` — create a bottle
//!
//! - **Bottle endpoints**
//!   - `GET    /cellar/accounts/{account_id}/bottles/{bottle_id}` — show
//!   - `PATCH  /cellar/accounts/{account_id}/bottles/{bottle_id}` — partial update
//!   - `DELETE /cellar/accounts/{account_id}/bottles/{bottle_id}` — delete
//!   - `PUT    /cellar/accounts/{account_id}/bottles/{bottle_id}/actions/rate` — rate
//!   - `GET    /cellar/accounts/{account_id}/bottles/{bottle_id}/watch` — websocket

use crate::{
    handlers::{
        bottle_handlers::{
            create_bottle, delete_bottle, list_bottles, rate_bottle, show_bottle, update_bottle,
            watch_bottle,
        },
        health_handlers::{healthz, readyz},
    },
    services::bottle_service::BottleService,
};
use axum::{
    Router,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

/// Build and return the router for every cellar route.
///
/// The router carries shared state (`BottleService`) to all handlers.
pub fn routes() -> Router<BottleService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route(
            "/cellar/accounts/{account_id}/bottles",
            get(list_bottles).post(create_bottle),
        )
        .route(
            "/cellar/accounts/{account_id}/bottles/{bottle_id}",
            get(show_bottle).patch(update_bottle).delete(delete_bottle),
        )
        .route(
            "/cellar/accounts/{account_id}/bottles/{bottle_id}/actions/rate",
            put(rate_bottle),
        )
        .route(
            "/cellar/accounts/{account_id}/bottles/{bottle_id}/watch",
            get(watch_bottle),
        )
        .layer(TraceLayer::new_for_http())
}
