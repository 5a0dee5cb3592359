//! Cart state: lines keyed by product, pure transitions, and persistence.
//!
//! # Layers
//!
//! - [`Cart`] owns the lines and implements every transition as a plain
//!   method with no side effects.
//! - [`CartManager`] wraps a cart together with a [`CartStore`] slot and
//!   writes the whole cart back after each mutation.
//! - [`CartView`] and [`OrderFormFields`] are projections used for rendering
//!   and form submission.

mod manager;
mod order;
mod store;
mod view;

pub use manager::CartManager;
pub use order::OrderFormFields;
pub use store::{CartStore, MemoryStore, STORAGE_KEY, StoreError, decode_cart, encode_cart};
pub use view::{CartRowView, CartView};

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One product-and-quantity record in the order in progress.
///
/// `quantity` is always at least 1 for a line that lives in a [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredLine")]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Wire shape of a stored line.
///
/// Lines written by the older name-keyed cart have no `id`; the name stands
/// in for it.
#[derive(Deserialize)]
struct StoredLine {
    #[serde(default)]
    id: Option<String>,
    name: String,
    price: Price,
    #[serde(default)]
    img: Option<String>,
    quantity: u32,
}

impl TryFrom<StoredLine> for CartLine {
    type Error = crate::types::ProductIdError;

    fn try_from(line: StoredLine) -> Result<Self, Self::Error> {
        let id = match line.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ProductId::parse(id)?,
            _ => ProductId::parse(&line.name)?,
        };
        Ok(Self {
            id,
            name: line.name,
            price: line.price,
            img: line.img,
            quantity: line.quantity,
        })
    }
}

/// Outcome of [`Cart::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line with that id; nothing changed.
    Missing,
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

/// Ordered cart lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from arbitrary lines, enforcing the cart invariants.
    ///
    /// Zero-quantity lines are dropped and repeated ids are folded into their
    /// first occurrence with quantities summed.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of a product. An existing line is incremented; otherwise a
    /// new line with quantity 1 is appended. Returns the line's new quantity.
    pub fn add(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        img: Option<String>,
    ) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartLine {
            id,
            name: name.into(),
            price,
            img,
            quantity: 1,
        });
        1
    }

    /// Remove the line for `id`, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Add `delta` to a line's quantity, removing the line if the result is
    /// zero or below.
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return QuantityChange::Missing;
        };
        let next = i64::from(line.quantity).saturating_add(delta);
        if next <= 0 {
            self.remove(id);
            return QuantityChange::Removed;
        }
        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    /// Sum of `price * quantity` over all lines, rounded to cents.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .sum::<Price>()
            .round_to_cents()
    }

    /// Sum of all quantities, shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// One `"<qty>x <name> - $<line total>"` entry per line, newline-joined.
    #[must_use]
    pub fn summary(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}x {} - {}", l.quantity, l.name, l.line_total().display()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let mut cart = Cart::new();
        for n in 1..=5 {
            assert_eq!(cart.add(id("p1"), "Burger", price("9.50"), None), n);
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 5);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(id("soup"), "Soup", price("5"), None);
        cart.add(id("pie"), "Pie", price("4"), None);
        cart.add(id("soup"), "Soup", price("5"), None);
        let ids: Vec<_> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["soup", "pie"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(id("p1"), "Burger", price("9.50"), None);
        let before = cart.clone();
        assert!(cart.remove("nope").is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(id("p1"), "Burger", price("9.50"), None);
        cart.add(id("p1"), "Burger", price("9.50"), None);
        cart.add(id("p2"), "Fries", price("3.00"), None);
        assert_eq!(cart.change_quantity("p1", -2), QuantityChange::Removed);
        assert!(cart.get("p1").is_none());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_change_quantity_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(id("p1"), "Burger", price("9.50"), None);
        assert_eq!(cart.change_quantity("p1", -10), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_missing_and_positive() {
        let mut cart = Cart::new();
        assert_eq!(cart.change_quantity("ghost", 3), QuantityChange::Missing);
        cart.add(id("p1"), "Burger", price("9.50"), None);
        assert_eq!(cart.change_quantity("p1", 3), QuantityChange::Updated(4));
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = Cart::new();
        assert_eq!(cart.total().to_fixed(), "0.00");
        cart.add(id("p1"), "Burger", price("9.50"), None);
        cart.add(id("p2"), "Lemonade", price("2.333"), None);
        cart.add(id("p2"), "Lemonade", price("2.333"), None);
        assert_eq!(cart.item_count(), 3);
        // 9.50 + 4.666 = 14.166
        assert_eq!(cart.total().to_fixed(), "14.17");
    }

    #[test]
    fn test_summary_format() {
        let mut cart = Cart::new();
        assert_eq!(cart.summary(), "");
        cart.add(id("p1"), "Burger", price("9.50"), None);
        cart.add(id("p1"), "Burger", price("9.50"), None);
        cart.add(id("p2"), "Fries", price("3"), None);
        assert_eq!(cart.summary(), "2x Burger - $19.00\n1x Fries - $3.00");
    }

    #[test]
    fn test_from_lines_enforces_invariants() {
        let line = |i: &str, q: u32| CartLine {
            id: id(i),
            name: i.to_uppercase(),
            price: price("1"),
            img: None,
            quantity: q,
        };
        let cart = Cart::from_lines(vec![line("a", 1), line("b", 0), line("a", 2), line("c", 1)]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("a").unwrap().quantity, 3);
        assert!(cart.get("b").is_none());
    }

    #[test]
    fn test_legacy_line_uses_name_as_id() {
        let line: CartLine =
            serde_json::from_str(r#"{"name":"Caesar Salad","price":8.5,"quantity":2}"#).unwrap();
        assert_eq!(line.id, "Caesar Salad");
        assert_eq!(line.quantity, 2);
        assert!(line.img.is_none());
    }

    #[test]
    fn test_line_serializes_storage_shape() {
        let mut cart = Cart::new();
        cart.add(id("p1"), "Burger", price("9.50"), Some("img/burger.jpg".into()));
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":"p1","name":"Burger","price":9.5,"img":"img/burger.jpg","quantity":1}]"#
        );
    }
}
