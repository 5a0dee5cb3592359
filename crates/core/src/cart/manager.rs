//! Cart manager: a cart bound to its storage slot.

use tracing::{debug, warn};

use super::store::{CartStore, StoreError, decode_cart, encode_cart};
use super::{Cart, CartView, OrderFormFields, QuantityChange};
use crate::types::{Price, ProductId};

/// Owns the in-memory cart and mirrors it to a [`CartStore`].
///
/// The slot is read once by [`CartManager::load`]; storage wins over any
/// in-memory state. Every mutating operation writes the full cart back before
/// returning. If that write fails the in-memory transition still stands and
/// the error is returned.
///
/// ```
/// use bistro_core::cart::MemoryStore;
/// use bistro_core::{CartManager, Price, ProductId};
///
/// let mut cart = CartManager::load(MemoryStore::new());
/// let burger = ProductId::parse("p1").unwrap();
/// cart.add_item(burger.clone(), "Burger", Price::parse("9.50").unwrap(), None).unwrap();
/// cart.add_item(burger, "Burger", Price::parse("9.50").unwrap(), None).unwrap();
/// assert_eq!(cart.compute_total().to_fixed(), "19.00");
///
/// cart.change_quantity("p1", -2).unwrap();
/// assert_eq!(cart.item_count(), 0);
/// assert_eq!(cart.compute_total().to_fixed(), "0.00");
/// ```
#[derive(Debug)]
pub struct CartManager<S> {
    cart: Cart,
    store: S,
}

impl<S: CartStore> CartManager<S> {
    /// Restore the cart from `store`.
    ///
    /// A slot that cannot be read, or holds an undecodable value, yields an
    /// empty cart.
    pub fn load(store: S) -> Self {
        let raw = store.read().unwrap_or_else(|e| {
            warn!(error = %e, "Cart storage unreadable, starting empty");
            None
        });
        let cart = decode_cart(raw.as_deref());
        debug!(lines = cart.len(), "Cart loaded");
        Self { cart, store }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The storage slot.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Release the storage slot, dropping the in-memory cart.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Add one unit of a product, appending a line if it is new.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        img: Option<String>,
    ) -> Result<u32, StoreError> {
        let quantity = self.cart.add(id, name, price, img);
        self.persist()?;
        Ok(quantity)
    }

    /// Remove the line for `id`. An absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn remove_item(&mut self, id: &str) -> Result<Option<super::CartLine>, StoreError> {
        let removed = self.cart.remove(id);
        if removed.is_none() {
            debug!(id, "Remove requested for line not in cart");
        }
        self.persist()?;
        Ok(removed)
    }

    /// Adjust a line's quantity by `delta`; zero or below removes the line.
    /// An absent id leaves the cart and the slot untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> Result<QuantityChange, StoreError> {
        let change = self.cart.change_quantity(id, delta);
        if change != QuantityChange::Missing {
            self.persist()?;
        }
        Ok(change)
    }

    /// Sum of line totals, rounded to cents.
    #[must_use]
    pub fn compute_total(&self) -> Price {
        self.cart.total()
    }

    /// Newline-joined `"<qty>x <name> - $<line total>"` listing.
    #[must_use]
    pub fn format_summary(&self) -> String {
        self.cart.summary()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Project the cart for display.
    #[must_use]
    pub fn render(&self) -> CartView {
        CartView::from(&self.cart)
    }

    /// Hidden order form fields for the current cart.
    #[must_use]
    pub fn order_fields(&self) -> OrderFormFields {
        OrderFormFields::from_cart(&self.cart)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = encode_cart(&self.cart)?;
        self.store.write(&raw)?;
        debug!(
            lines = self.cart.len(),
            items = self.cart.item_count(),
            "Cart persisted"
        );
        Ok(())
    }
}
