//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Menu page
//! GET  /health             - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart               - Cart listing fragment
//! POST /cart/add           - Add to cart (returns badge, triggers cart-updated)
//! POST /cart/update        - Adjust quantity (returns listing fragment)
//! POST /cart/remove        - Remove line (returns listing fragment)
//! GET  /cart/count         - Cart count badge (fragment)
//!
//! # Ordering
//! GET  /order              - Order page with hidden form fields
//! GET  /order/summary      - Order summary and hidden fields (fragment)
//! GET  /buy-now/{id}       - Single-item checkout
//! GET  /reservations       - Reservation form
//! ```

pub mod cart;
pub mod menu;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .nest("/cart", cart_routes())
        .route("/order", get(order::show))
        .route("/order/summary", get(order::summary))
        .route("/buy-now/{id}", get(order::buy_now))
        .route("/reservations", get(order::reservations))
}
