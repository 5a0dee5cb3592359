//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each request restores a [`CartManager`] from the session slot, applies one
//! operation, and writes the slot back before responding. Every mutation
//! answers with `HX-Trigger: cart-updated` so the badge and any open listing
//! refresh themselves.

use std::fmt::Write as _;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderValue,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bistro_core::cart::{MemoryStore, QuantityChange, STORAGE_KEY};
use bistro_core::{CartManager, CartView, Price, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// A cart restored from the session slot for the span of one request.
pub type SessionCart = CartManager<MemoryStore>;

/// Event name HTMX listeners use to refresh cart widgets.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

// =============================================================================
// Session Slot
// =============================================================================

/// Restore the cart from the session.
///
/// A session read failure is treated like an absent slot.
pub async fn load_cart(session: &Session) -> SessionCart {
    let raw = session
        .get::<String>(STORAGE_KEY)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read cart from session");
            None
        });
    CartManager::load(MemoryStore::with_raw(raw))
}

/// Write the cart's slot back to the session.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn store_cart(session: &Session, cart: &SessionCart) -> Result<()> {
    if let Some(raw) = cart.store().raw() {
        session.insert(STORAGE_KEY, raw).await?;
    }
    Ok(())
}

/// `HX-Trigger` value announcing a cart change, optionally with a toast.
///
/// Header values are read as Latin-1, so the JSON payload is kept to ASCII by
/// writing every other character as a `\uXXXX` escape.
fn cart_trigger(notification: Option<&str>) -> HeaderValue {
    let Some(message) = notification else {
        return HeaderValue::from_static(CART_UPDATED_EVENT);
    };
    let payload = serde_json::json!({ "cart-updated": null, "notify": message });
    HeaderValue::from_str(&escape_non_ascii(&payload.to_string()))
        .unwrap_or_else(|_| HeaderValue::from_static(CART_UPDATED_EVENT))
}

/// Rewrite non-ASCII characters of serialized JSON as UTF-16 `\u` escapes.
///
/// Serialized JSON only carries non-ASCII inside string literals, where the
/// escape form is equivalent.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        for unit in c.encode_utf16(&mut units) {
            let _ = write!(out, "\\u{unit:04x}");
        }
    }
    out
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data, carried by each menu item's button.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub img: Option<String>,
}

/// Quantity adjustment form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart listing fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart listing (HTMX).
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartItemsTemplate {
        cart: cart.render(),
    }
}

/// Add one unit of a menu item to the cart (HTMX).
///
/// The posted id must name a menu item. The menu's name, price, and image are
/// stored; a posted price that disagrees with the menu is logged and ignored.
/// Returns the badge fragment with a trigger carrying the notification.
#[instrument(skip(state, session), fields(id = %form.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::parse(&form.id)?;
    let posted_price = Price::parse(&form.price)?;
    let item = state
        .menu()
        .find(id.as_str())
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;
    if posted_price != item.price {
        tracing::warn!(
            id = %id,
            posted = %posted_price,
            menu = %item.price,
            "Posted price differs from menu, using menu price"
        );
    }

    let mut cart = load_cart(&session).await;
    let quantity = cart.add_item(id.clone(), item.name.clone(), item.price, item.img.clone())?;
    store_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added item", Some(&[("id", id.as_str())]));
    tracing::info!(id = %id, quantity, "Item added to cart");

    let notification = format!("{} added to cart", item.name);
    Ok((
        AppendHeaders([("HX-Trigger", cart_trigger(Some(&notification)))]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Adjust a line's quantity (HTMX).
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    let change = cart.change_quantity(form.id.trim(), form.delta)?;
    if change == QuantityChange::Missing {
        tracing::debug!(id = %form.id, "Quantity change for line not in cart");
    } else {
        store_cart(&session, &cart).await?;
    }

    Ok((
        AppendHeaders([("HX-Trigger", cart_trigger(None))]),
        CartItemsTemplate {
            cart: cart.render(),
        },
    )
        .into_response())
}

/// Remove a line (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.remove_item(form.id.trim())?;
    store_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", cart_trigger(None))]),
        CartItemsTemplate {
            cart: cart.render(),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_trigger_plain() {
        assert_eq!(cart_trigger(None), "cart-updated");
    }

    #[test]
    fn test_cart_trigger_with_notification() {
        let value = cart_trigger(Some("Classic Burger added to cart"));
        let json: serde_json::Value =
            serde_json::from_slice(value.as_bytes()).unwrap_or_default();
        assert_eq!(json["notify"], "Classic Burger added to cart");
        assert!(json.get("cart-updated").is_some());
    }

    #[test]
    fn test_cart_trigger_non_ascii_is_escaped() {
        let value = cart_trigger(Some("Crème brûlée added to cart"));
        assert!(value.as_bytes().is_ascii());
        assert!(value.to_str().is_ok());

        let json: serde_json::Value =
            serde_json::from_slice(value.as_bytes()).unwrap_or_default();
        assert_eq!(json["notify"], "Crème brûlée added to cart");
    }

    #[test]
    fn test_escape_non_ascii_uses_surrogate_pairs() {
        assert_eq!(escape_non_ascii(r#""é""#), r#""\u00e9""#);
        assert_eq!(escape_non_ascii(r#""🍔""#), r#""\ud83c\udf54""#);
        assert_eq!(escape_non_ascii(r#"{"a":1}"#), r#"{"a":1}"#);
    }
}
