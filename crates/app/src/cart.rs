//! Session cart.
//!
//! The cart is an ordered list of dishes. The same dish may appear any number
//! of times; removal is by dish id and takes every matching entry with it.

use serde::Serialize;
use u_cook_core::{Dish, DishId, Price};

/// Ordered cart contents for the current session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Dish>,
}

/// One grouped cart line for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub dish: Dish,
    pub quantity: u32,
    pub line_total: Price,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a dish. Duplicates are kept.
    pub fn add(&mut self, dish: Dish) {
        self.items.push(dish);
    }

    /// Remove every entry with the given id.
    ///
    /// Returns how many entries were removed; zero when the id is absent.
    pub fn remove(&mut self, id: &DishId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        before - self.items.len()
    }

    /// Number of entries, counting duplicates.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Dish] {
        &self.items
    }

    /// Sum of all entry prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|dish| dish.price).sum()
    }

    /// Entries grouped by dish id, in order of first appearance.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = Vec::new();
        for dish in &self.items {
            if let Some(line) = lines.iter_mut().find(|line| line.dish.id == dish.id) {
                line.quantity += 1;
                line.line_total = line.dish.price.times(line.quantity);
            } else {
                lines.push(CartLine {
                    dish: dish.clone(),
                    quantity: 1,
                    line_total: dish.price,
                });
            }
        }
        lines
    }
}
