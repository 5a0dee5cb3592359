//! Hidden fields submitted with an order form.

use serde::{Deserialize, Serialize};

use super::Cart;
use crate::types::Price;

/// The two opaque fields the form-processing endpoint receives with an
/// order, alongside whatever contact fields the page defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFormFields {
    /// Newline-joined order listing.
    #[serde(rename = "order-details")]
    pub order_details: String,
    /// Order total to two decimals, no currency symbol.
    #[serde(rename = "order-total")]
    pub order_total: String,
}

impl OrderFormFields {
    /// Fields for an order of everything in the cart.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            order_details: cart.summary(),
            order_total: cart.total().to_fixed(),
        }
    }

    /// Fields for a buy-now order of one unit of a single item.
    #[must_use]
    pub fn single_item(name: &str, price: Price) -> Self {
        Self {
            order_details: format!("1x {name} - {}", price.display()),
            order_total: price.to_fixed(),
        }
    }
}
