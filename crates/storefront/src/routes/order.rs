//! Order, buy-now, and reservation pages.
//!
//! These pages post straight to the third-party form endpoint; nothing is
//! submitted back to this server. The hidden `order-details` and
//! `order-total` fields are filled in when the page is rendered from the
//! cart in the session slot.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Local;
use tower_sessions::Session;
use tracing::instrument;

use bistro_core::{CartView, OrderFormFields};

use crate::error::{AppError, Result};
use crate::menu::MenuItem;
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// Order page template.
#[derive(Template, WebTemplate)]
#[template(path = "order.html")]
pub struct OrderTemplate {
    pub site_name: String,
    pub cart_count: u64,
    pub cart: CartView,
    pub fields: OrderFormFields,
    pub endpoint: String,
}

/// Order summary fragment: listing, hidden form fields, and submit button.
///
/// Re-fetched on `cart-updated` so the submitted fields follow edits made in
/// the cart dialog.
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_summary.html")]
pub struct OrderSummaryTemplate {
    pub cart: CartView,
    pub fields: OrderFormFields,
}

/// Single-item checkout template.
#[derive(Template, WebTemplate)]
#[template(path = "buy_now.html")]
pub struct BuyNowTemplate {
    pub site_name: String,
    pub cart_count: u64,
    pub item: MenuItem,
    pub fields: OrderFormFields,
    pub endpoint: String,
}

/// Reservation page template.
#[derive(Template, WebTemplate)]
#[template(path = "reservations.html")]
pub struct ReservationTemplate {
    pub site_name: String,
    pub cart_count: u64,
    /// Earliest bookable date, `YYYY-MM-DD`.
    pub min_date: String,
    pub endpoint: String,
}

/// Display the order page for the whole cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    OrderTemplate {
        site_name: state.menu().name.clone(),
        cart_count: cart.item_count(),
        cart: cart.render(),
        fields: cart.order_fields(),
        endpoint: state.config().formspree.order_endpoint.to_string(),
    }
}

/// Refresh the order summary fragment (HTMX).
#[instrument(skip(session))]
pub async fn summary(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    OrderSummaryTemplate {
        cart: cart.render(),
        fields: cart.order_fields(),
    }
}

/// Display the single-item checkout for one menu item.
///
/// Bypasses the cart: the stored cart is neither read for the order nor
/// modified.
#[instrument(skip(state, session))]
pub async fn buy_now(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let item = state
        .menu()
        .find(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;
    let cart = load_cart(&session).await;

    Ok(BuyNowTemplate {
        site_name: state.menu().name.clone(),
        cart_count: cart.item_count(),
        fields: OrderFormFields::single_item(&item.name, item.price),
        item,
        endpoint: state.config().formspree.order_endpoint.to_string(),
    })
}

/// Display the reservation form.
#[instrument(skip(state, session))]
pub async fn reservations(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    ReservationTemplate {
        site_name: state.menu().name.clone(),
        cart_count: cart.item_count(),
        min_date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        endpoint: state.config().formspree.reservation_endpoint.to_string(),
    }
}
