//! Storage slot for the serialized cart.
//!
//! A slot holds one string: the JSON array of cart lines. It is read once when
//! a [`CartManager`](super::CartManager) is created and overwritten wholesale
//! after every mutation. Reading never fails the caller; anything that cannot
//! be decoded becomes an empty cart.

use thiserror::Error;
use tracing::warn;

use super::{Cart, CartLine};

/// Name of the storage slot holding the cart.
pub const STORAGE_KEY: &str = "restaurantCart";

/// Errors raised by a storage slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing medium failed to read or write.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot is not available (e.g. the session store rejected the write).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A single durable slot holding the serialized cart.
pub trait CartStore {
    /// Read the raw stored value, `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the slot with `raw`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn write(&mut self, raw: &str) -> Result<(), StoreError>;
}

/// In-memory slot.
///
/// Used by tests and as a per-request snapshot of a session slot: seed it
/// with the stored value, let the manager mutate it, then copy
/// [`MemoryStore::raw`] back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: None }
    }

    /// A slot that already holds `raw`.
    #[must_use]
    pub const fn with_raw(raw: Option<String>) -> Self {
        Self { raw }
    }

    /// The current stored value.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    #[must_use]
    pub fn into_raw(self) -> Option<String> {
        self.raw
    }
}

impl CartStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.raw.clone())
    }

    fn write(&mut self, raw: &str) -> Result<(), StoreError> {
        self.raw = Some(raw.to_owned());
        Ok(())
    }
}

/// Decode a stored cart, failing open.
///
/// Absent, blank, or malformed values yield an empty cart. Decoded lines pass
/// through [`Cart::from_lines`] so the cart invariants hold.
#[must_use]
pub fn decode_cart(raw: Option<&str>) -> Cart {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Cart::new();
    };
    match serde_json::from_str::<Vec<CartLine>>(raw) {
        Ok(lines) => Cart::from_lines(lines),
        Err(e) => {
            warn!(error = %e, "Discarding malformed stored cart");
            Cart::new()
        }
    }
}

/// Encode a cart into its stored representation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_cart(cart: &Cart) -> Result<String, StoreError> {
    Ok(serde_json::to_string(cart)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    #[test]
    fn test_decode_absent_and_blank() {
        assert!(decode_cart(None).is_empty());
        assert!(decode_cart(Some("")).is_empty());
        assert!(decode_cart(Some("   ")).is_empty());
    }

    #[test]
    fn test_decode_malformed_fails_open() {
        assert!(decode_cart(Some("{not json")).is_empty());
        assert!(decode_cart(Some(r#"{"id":"p1"}"#)).is_empty());
        assert!(decode_cart(Some(r#"[{"id":"p1","name":"x","price":1,"quantity":-1}]"#)).is_empty());
        assert!(decode_cart(Some(r#"[{"id":"p1","name":"x","price":-1,"quantity":1}]"#)).is_empty());
    }

    #[test]
    fn test_decode_drops_zero_quantity() {
        let cart = decode_cart(Some(
            r#"[{"id":"a","name":"A","price":1,"quantity":0},{"id":"b","name":"B","price":2,"quantity":1}]"#,
        ));
        assert_eq!(cart.len(), 1);
        assert!(cart.get("b").is_some());
    }

    #[test]
    fn test_encode_decode_preserves_cart() {
        let mut cart = Cart::new();
        cart.add(
            ProductId::parse("p1").unwrap(),
            "Burger",
            Price::parse("9.50").unwrap(),
            Some("images/burger.jpg".into()),
        );
        cart.add(
            ProductId::parse("p2").unwrap(),
            "Tiramisu",
            Price::parse("6.75").unwrap(),
            None,
        );
        cart.change_quantity("p2", 2);

        let raw = encode_cart(&cart).unwrap();
        assert_eq!(decode_cart(Some(&raw)), cart);
    }

    #[test]
    fn test_memory_store_overwrites() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read().unwrap(), None);
        store.write("[]").unwrap();
        store.write("[1]").unwrap();
        assert_eq!(store.raw(), Some("[1]"));
    }
}
