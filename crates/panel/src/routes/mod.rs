//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Upstream reachability check
//!
//! # Auth
//! POST /auth/login              - Seller login (upstream credential check)
//! POST /auth/logout             - Destroy the session
//! GET  /auth/me                 - Current seller + approval state
//! POST /auth/refresh            - Force an approval-status refresh
//!
//! # Dashboard (login required)
//! GET  /dashboard               - Counts and order statistics
//!
//! # Orders (approval required)
//! GET  /orders                  - Normalized order list with filters
//! POST /orders/{id}/type        - Toggle order/inquiry
//! POST /orders/{id}/line-items/{item}/status - Transition a line item
//! GET  /orders/{id}/shipping    - Open the shipping editor
//! PUT  /shipping                - Submit the shipping editor
//!
//! # Profile (login required)
//! GET  /profile                 - Flattened profile form
//! PUT  /profile                 - Save profile (multipart PATCH upstream)
//!
//! # Stock (approval required)
//! GET  /stock                   - Stock listing
//! POST /stock                   - Create stock row
//! PATCH /stock/{id}             - Update quantity
//! DELETE /stock/{id}            - Delete stock row
//!
//! # Packages (login required)
//! GET  /packages                - Package history, newest first
//! ```

pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod packages;
pub mod profile;
pub mod stock;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Build the panel router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/refresh", post(auth::refresh))
        // Dashboard
        .route("/dashboard", get(dashboard::summary))
        // Orders
        .route("/orders", get(orders::list))
        .route("/orders/{order_id}/type", post(orders::update_order_type))
        .route(
            "/orders/{order_id}/line-items/{line_item_id}/status",
            post(orders::update_status),
        )
        .route("/orders/{order_id}/shipping", get(orders::open_shipping))
        .route("/shipping", put(orders::submit_shipping))
        // Profile
        .route("/profile", get(profile::show).put(profile::update))
        // Stock
        .route("/stock", get(stock::list).post(stock::create))
        .route("/stock/{id}", axum::routing::patch(stock::update).delete(stock::remove))
        // Packages
        .route("/packages", get(packages::history))
}
