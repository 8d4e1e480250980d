//! Screen router and owner of cross-screen state.
//!
//! The navigator is the single source of truth for the active screen, the
//! user's preferences, the cart and the selected chef. Every transition is
//! triggered by a user gesture; none of them validate preconditions.

use tracing::{debug, info};
use u_cook_core::{Chef, Dish, DishId, Screen, UserPreferences};

use crate::cart::Cart;

/// What the presentation layer should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Onboarding,
    Main,
    Menu,
    Chef(&'a Chef),
    Cart,
    /// The chef screen was entered without a selected chef.
    Blank,
}

/// Active-screen state machine plus session-wide state.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    screen: Screen,
    preferences: Option<UserPreferences>,
    cart: Cart,
    selected_chef: Option<Chef>,
}

impl Navigator {
    /// A fresh session on the onboarding screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the onboarding result and enter the main screen.
    ///
    /// Calling this again overwrites the stored preferences.
    pub fn complete_onboarding(&mut self, preferences: UserPreferences) {
        if self.preferences.is_some() {
            debug!("Overwriting existing preferences");
        }
        info!(
            cuisines = preferences.cuisines.len(),
            frequency = preferences.frequency.value(),
            "Onboarding complete"
        );
        self.preferences = Some(preferences);
        self.navigate(Screen::Main);
    }

    /// Append a dish to the cart.
    pub fn add_to_cart(&mut self, dish: Dish) {
        debug!(dish_id = %dish.id, "Adding dish to cart");
        self.cart.add(dish);
    }

    /// Remove every cart entry with the given id.
    pub fn remove_from_cart(&mut self, id: &DishId) -> usize {
        let removed = self.cart.remove(id);
        debug!(dish_id = %id, removed, "Removed dish from cart");
        removed
    }

    /// Select a chef and open their profile.
    pub fn show_chef(&mut self, chef: Chef) {
        debug!(chef_id = %chef.id, "Showing chef");
        self.selected_chef = Some(chef);
        self.navigate(Screen::Chef);
    }

    /// Switch to a screen unconditionally.
    pub fn navigate(&mut self, screen: Screen) {
        debug!(from = %self.screen, to = %screen, "Navigating");
        self.screen = screen;
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub const fn preferences(&self) -> Option<&UserPreferences> {
        self.preferences.as_ref()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.cart.count()
    }

    #[must_use]
    pub const fn selected_chef(&self) -> Option<&Chef> {
        self.selected_chef.as_ref()
    }

    /// Resolve the active screen into something drawable.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        match self.screen {
            Screen::Onboarding => View::Onboarding,
            Screen::Main => View::Main,
            Screen::Menu => View::Menu,
            Screen::Cart => View::Cart,
            Screen::Chef => self.selected_chef.as_ref().map_or(View::Blank, View::Chef),
        }
    }
}
