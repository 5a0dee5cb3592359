//! Display projection of a cart.

use super::{Cart, CartLine};

/// One rendered cart row.
///
/// `id` is what the quantity and remove controls post back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub rows: Vec<CartRowView>,
    pub total: String,
    pub item_count: u64,
    /// False when the cart is empty; the place-order control is disabled.
    pub place_order_enabled: bool,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&CartLine> for CartRowView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            unit_price: line.price.display(),
            quantity: line.quantity,
            line_total: line.line_total().display(),
            image: line.img.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            rows: cart.lines().iter().map(CartRowView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
            place_order_enabled: !cart.is_empty(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    #[test]
    fn test_empty_view() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.total, "$0.00");
        assert_eq!(view.item_count, 0);
        assert!(!view.place_order_enabled);
    }

    #[test]
    fn test_rows_mirror_lines() {
        let mut cart = Cart::new();
        cart.add(
            ProductId::parse("wings").unwrap(),
            "Hot Wings",
            Price::parse("7.25").unwrap(),
            Some("images/wings.jpg".into()),
        );
        cart.change_quantity("wings", 2);

        let view = CartView::from(&cart);
        assert_eq!(
            view.rows,
            vec![CartRowView {
                id: "wings".into(),
                name: "Hot Wings".into(),
                unit_price: "$7.25".into(),
                quantity: 3,
                line_total: "$21.75".into(),
                image: Some("images/wings.jpg".into()),
            }]
        );
        assert_eq!(view.total, "$21.75");
        assert_eq!(view.item_count, 3);
    }
}
