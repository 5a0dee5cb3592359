//! File-backed cart commands.
//!
//! Each command loads the cart from the file slot, applies one operation, and
//! lets the manager write the file back.

use std::path::Path;

use tracing::info;

use bistro_core::cart::QuantityChange;
use bistro_core::{CartManager, Price, ProductId};

use crate::store::FileStore;

type FileCart = CartManager<FileStore>;

fn open(path: &Path) -> FileCart {
    CartManager::load(FileStore::new(path))
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the id or price is malformed, or the file cannot be
/// written.
pub fn add(
    path: &Path,
    id: &str,
    name: &str,
    price: &str,
    img: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = ProductId::parse(id)?;
    let price = Price::parse(price)?;

    let mut cart = open(path);
    let quantity = cart.add_item(id.clone(), name.trim(), price, img)?;

    info!(%id, quantity, "{} added to cart", name.trim());
    Ok(())
}

/// Remove a line. An absent id is reported but not an error.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn remove(path: &Path, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = open(path);
    match cart.remove_item(id)? {
        Some(line) => info!(id, "Removed {}", line.name),
        None => info!(id, "No such line in cart"),
    }
    Ok(())
}

/// Adjust a line's quantity.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn qty(path: &Path, id: &str, delta: i64) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = open(path);
    match cart.change_quantity(id, delta)? {
        QuantityChange::Missing => info!(id, "No such line in cart"),
        QuantityChange::Updated(quantity) => info!(id, quantity, "Quantity updated"),
        QuantityChange::Removed => info!(id, "Line removed"),
    }
    Ok(())
}

/// Print the summary, item count, and total.
pub fn show(path: &Path) {
    let cart = open(path);
    let view = cart.render();

    if view.is_empty() {
        info!("Cart is empty");
        return;
    }

    info!("Cart ({} items)", view.item_count);
    info!("================");
    for line in cart.format_summary().lines() {
        info!("  {line}");
    }
    info!("Total: {}", view.total);
}

/// Print the hidden order form fields as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the fields cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn fields(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let cart = open(path);
    let json = serde_json::to_string_pretty(&cart.order_fields())?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::tests::temp_cart_path;

    #[test]
    fn test_add_qty_remove_flow() {
        let path = temp_cart_path();

        add(&path, "p1", "Burger", "9.50", Some("img/burger.jpg".to_string())).unwrap();
        add(&path, "p1", "Burger", "9.50", None).unwrap();
        add(&path, "p2", "Fries", "3.25", None).unwrap();

        let cart = open(&path);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.compute_total().to_fixed(), "22.25");

        qty(&path, "p1", -1).unwrap();
        remove(&path, "p2").unwrap();

        let cart = open(&path);
        assert_eq!(cart.format_summary(), "1x Burger - $9.50");

        qty(&path, "p1", -1).unwrap();
        assert!(open(&path).cart().is_empty());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_add_rejects_bad_price() {
        let path = temp_cart_path();
        assert!(add(&path, "p1", "Burger", "nine", None).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_qty_on_missing_line_does_not_create_file() {
        let path = temp_cart_path();
        qty(&path, "ghost", 1).unwrap();
        assert!(!path.exists());
    }
}
