//! Menu file validation.

use std::path::Path;

use tracing::{error, info};

use bistro_storefront::menu::{Menu, MenuError};

/// Validate a menu YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, or fails
/// validation.
pub async fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    info!(path = %path.display(), "Checking menu file");

    let content = tokio::fs::read_to_string(path).await?;
    let menu = match Menu::from_yaml(&content) {
        Ok(menu) => menu,
        Err(MenuError::Invalid(problems)) => {
            error!("Menu validation failed:");
            for problem in &problems {
                error!("  - {problem}");
            }
            return Err(format!("{} validation errors found", problems.len()).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!("Menu is valid");
    info!("  Name: {}", menu.name);
    info!("  Categories: {}", menu.categories.len());
    info!("  Items: {}", menu.items().count());

    Ok(())
}
