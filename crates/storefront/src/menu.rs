//! Menu catalog loaded from YAML.
//!
//! The menu drives the add-to-cart and buy-now buttons on the menu page.
//!
//! ```yaml
//! name: Bistro
//! categories:
//!   - id: mains
//!     title: Mains
//!     items:
//!       - id: burger
//!         name: Classic Burger
//!         description: Beef patty, cheddar, pickles
//!         price: 9.50
//!         img: /static/images/burger.jpg
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use bistro_core::{Price, ProductId};

/// Errors loading a menu file.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("failed to read menu file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse menu: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("menu has {} problem(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),
}

/// A dish or drink that can be ordered.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItem {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub img: Option<String>,
}

/// A section of the menu (starters, mains, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// The full menu.
#[derive(Debug, Clone, Deserialize)]
pub struct Menu {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

impl Menu {
    /// Parse and validate a menu from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or fails [`Menu::validate`].
    pub fn from_yaml(content: &str) -> Result<Self, MenuError> {
        let menu: Self = serde_yaml::from_str(content)?;
        let problems = menu.validate();
        if !problems.is_empty() {
            return Err(MenuError::Invalid(problems));
        }
        Ok(menu)
    }

    /// Read, parse, and validate a menu file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid menu.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let content = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Check the menu for problems; an empty list means it is valid.
    ///
    /// Item ids must be unique across the whole menu because they key cart
    /// lines. Category ids must be unique because they are page anchors.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut category_ids = HashSet::new();
        let mut item_ids = HashSet::new();

        if self.name.trim().is_empty() {
            problems.push("menu name is empty".to_string());
        }

        for category in &self.categories {
            if category.id.trim().is_empty() {
                problems.push(format!("category '{}' has an empty id", category.title));
            } else if !category_ids.insert(category.id.as_str()) {
                problems.push(format!("duplicate category id '{}'", category.id));
            }
            for item in &category.items {
                if item.name.trim().is_empty() {
                    problems.push(format!("item '{}' has an empty name", item.id));
                }
                if !item_ids.insert(item.id.as_str()) {
                    problems.push(format!("duplicate item id '{}'", item.id));
                }
            }
        }

        problems
    }

    /// Find an item by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items().find(|item| item.id == id)
    }

    /// All items in menu order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
name: Test Bistro
categories:
  - id: mains
    title: Mains
    items:
      - id: burger
        name: Classic Burger
        price: 9.50
        img: /static/images/burger.jpg
      - id: pasta
        name: Pasta
        description: Fresh tagliatelle
        price: 12
  - id: drinks
    title: Drinks
    items:
      - id: lemonade
        name: Lemonade
        price: 3
";

    #[test]
    fn test_parse_sample() {
        let menu = Menu::from_yaml(SAMPLE).unwrap();
        assert_eq!(menu.categories.len(), 2);
        assert_eq!(menu.items().count(), 3);

        let burger = menu.find("burger").unwrap();
        assert_eq!(burger.price.display(), "$9.50");
        assert_eq!(burger.img.as_deref(), Some("/static/images/burger.jpg"));
        assert_eq!(menu.find("pasta").unwrap().price.to_fixed(), "12.00");
        assert!(menu.find("pizza").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r"
name: Dupes
categories:
  - id: a
    title: A
    items:
      - { id: x, name: X, price: 1 }
  - id: a
    title: B
    items:
      - { id: x, name: Y, price: 2 }
";
        let Err(MenuError::Invalid(problems)) = Menu::from_yaml(yaml) else {
            panic!("expected validation failure");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().any(|p| p.contains("category id 'a'")));
        assert!(problems.iter().any(|p| p.contains("item id 'x'")));
    }

    #[test]
    fn test_negative_price_is_parse_error() {
        let yaml = "name: Bad\ncategories:\n  - id: a\n    title: A\n    items:\n      - { id: x, name: X, price: -1 }\n";
        assert!(matches!(Menu::from_yaml(yaml), Err(MenuError::Parse(_))));
    }

    #[test]
    fn test_bundled_menu_is_valid() {
        let menu = Menu::from_yaml(include_str!("../content/menu.yaml")).unwrap();
        assert!(menu.items().count() > 0);
    }
}
