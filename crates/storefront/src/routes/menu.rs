//! Menu page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::menu::MenuCategory;
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// Menu page template.
///
/// Each item renders an add-to-cart button carrying its id, name, price, and
/// image, plus a buy-now link to the single-item checkout.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub site_name: String,
    pub cart_count: u64,
    pub categories: Vec<MenuCategory>,
}

/// Display the menu.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    MenuTemplate {
        site_name: state.menu().name.clone(),
        cart_count: cart.item_count(),
        categories: state.menu().categories.clone(),
    }
}
