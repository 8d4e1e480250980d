//! Catalog inspection commands.
//!
//! # Usage
//!
//! ```bash
//! ucook-cli catalog validate dishes.yaml
//! ucook-cli catalog list --path dishes.yaml
//! ```

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use tracing::info;
use u_cook_app::Catalog;
use u_cook_app::catalog::CatalogError;
use u_cook_core::DishCatalog;

/// Errors from catalog commands.
#[derive(Debug, thiserror::Error)]
pub enum CatalogCommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Load and validate a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, is empty or
/// contains duplicate dish ids.
pub async fn validate(path: &Path) -> Result<(), CatalogCommandError> {
    let catalog = Catalog::load(path).await?;
    info!(path = %path.display(), dishes = catalog.len(), "Catalog is valid");

    let chefs: std::collections::BTreeSet<_> =
        catalog.dishes().iter().map(|dish| &dish.chef.id).collect();
    writeln!(
        std::io::stdout(),
        "{}: {} dishes from {} chefs",
        path.display(),
        catalog.len(),
        chefs.len()
    )?;
    Ok(())
}

/// Print the dishes of a catalog file, or of the built-in catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn list(path: Option<&Path>) -> Result<(), CatalogCommandError> {
    let catalog = Catalog::load_or_builtin(path).await?;
    std::io::stdout().write_all(listing(&catalog).as_bytes())?;
    Ok(())
}

/// One line per dish: id, name, cuisine, price, rating and chef.
fn listing(catalog: &impl DishCatalog) -> String {
    let mut out = String::new();
    for dish in catalog.dishes() {
        let _ = writeln!(
            out,
            "{:<4} {:<28} {:<10} {:>7}  {:.1}  {}",
            dish.id.as_str(),
            dish.name,
            dish.cuisine.as_str(),
            dish.price.to_string(),
            dish.rating,
            dish.chef.name
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_builtin() {
        let catalog = Catalog::builtin().unwrap();
        let text = listing(&catalog);

        assert_eq!(text.lines().count(), 3);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("1    Pasta Carbonara"));
        assert!(first.contains("italian"));
        assert!(first.contains("₽850"));
        assert!(first.ends_with("4.8  Marco Rossi"));
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let err = validate(Path::new("/nonexistent/u-cook/catalog.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogCommandError::Catalog(CatalogError::Read { .. })
        ));
    }
}
