//! Dish catalogs: the built-in mock dishes and YAML catalog files.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument};
use u_cook_core::{Dish, DishCatalog, DishId};

const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.yaml");

/// Errors raised while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog has no dishes")]
    Empty,
    #[error("duplicate dish id in catalog: {0}")]
    DuplicateId(DishId),
}

/// A validated, non-empty dish catalog with unique dish ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    /// Build a catalog from dishes in presentation order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty list and
    /// [`CatalogError::DuplicateId`] if two dishes share an id.
    pub fn new(dishes: Vec<Dish>) -> Result<Self, CatalogError> {
        if dishes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(dishes.len());
        for dish in &dishes {
            if !seen.insert(&dish.id) {
                return Err(CatalogError::DuplicateId(dish.id.clone()));
            }
        }

        Ok(Self { dishes })
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded catalog itself is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Parse a catalog from YAML text: a sequence of dishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not describe dishes or the dishes
    /// fail validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let dishes: Vec<Dish> = serde_yaml::from_str(yaml)?;
        debug!(dishes = dishes.len(), "Parsed catalog");
        Self::new(dishes)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.display().to_string(),
                source,
            })?;
        let catalog = Self::from_yaml(&content)?;
        info!(dishes = catalog.dishes.len(), "Loaded catalog file");
        Ok(catalog)
    }

    /// Load the configured catalog file, or fall back to the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file is unusable.
    pub async fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path).await,
            None => Self::builtin(),
        }
    }
}

impl DishCatalog for Catalog {
    fn dishes(&self) -> &[Dish] {
        &self.dishes
    }
}
