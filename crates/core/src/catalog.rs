//! The dish catalog seam.
//!
//! A session reads dishes through [`DishCatalog`] so the built-in mock data
//! can be swapped for a file or a catalog service without touching the
//! state machine.

use crate::types::{ChefId, Dish};

/// A read-only, fixed-order source of dishes.
pub trait DishCatalog: Send + Sync {
    /// All dishes, in presentation order.
    fn dishes(&self) -> &[Dish];

    /// Number of dishes.
    fn len(&self) -> usize {
        self.dishes().len()
    }

    /// Whether the catalog has no dishes.
    fn is_empty(&self) -> bool {
        self.dishes().is_empty()
    }

    /// Dish at a presentation index.
    fn get(&self, index: usize) -> Option<&Dish> {
        self.dishes().get(index)
    }

    /// Every dish cooked by the given chef, in presentation order.
    fn by_chef<'a>(&'a self, chef: &'a ChefId) -> Box<dyn Iterator<Item = &'a Dish> + 'a> {
        Box::new(self.dishes().iter().filter(move |dish| &dish.chef.id == chef))
    }
}

impl DishCatalog for Vec<Dish> {
    fn dishes(&self) -> &[Dish] {
        self
    }
}
