//! File-backed cart slot.

use std::io::ErrorKind;
use std::path::PathBuf;

use bistro_core::cart::{CartStore, StoreError};

/// A cart slot stored as a JSON file.
///
/// A missing file reads as an empty slot; the file is created on the first
/// write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, raw: &str) -> Result<(), StoreError> {
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub mod tests {
    use super::*;
    use bistro_core::{CartManager, Price, ProductId};

    /// A unique path under the system temp dir.
    pub fn temp_cart_path() -> PathBuf {
        std::env::temp_dir().join(format!("bistro-cart-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let store = FileStore::new(temp_cart_path());
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_cart_survives_reload() {
        let path = temp_cart_path();

        let mut cart = CartManager::load(FileStore::new(&path));
        cart.add_item(
            ProductId::parse("burger").unwrap(),
            "Classic Burger",
            Price::parse("9.50").unwrap(),
            None,
        )
        .unwrap();
        cart.add_item(
            ProductId::parse("burger").unwrap(),
            "Classic Burger",
            Price::parse("9.50").unwrap(),
            None,
        )
        .unwrap();

        let reloaded = CartManager::load(FileStore::new(&path));
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.compute_total().to_fixed(), "19.00");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_garbage_file_loads_empty() {
        let path = temp_cart_path();
        std::fs::write(&path, "not json").unwrap();

        let cart = CartManager::load(FileStore::new(&path));
        assert!(cart.cart().is_empty());

        std::fs::remove_file(&path).unwrap();
    }
}
