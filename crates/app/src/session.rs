//! One user's session: navigator, wizard, swipe engine and catalog.
//!
//! `Session` is the explicit context object every screen works against. It is
//! synchronous and owns no timers; [`crate::state::AppState`] wraps it to run
//! settle delays.
//!
//! Screen-local state follows the screen's lifetime. The onboarding form
//! exists while the onboarding screen is active; the swipe engine and filter
//! bar exist while the main screen is active. Leaving the main screen tears
//! them down and returning starts again from the first dish.

use std::num::NonZeroUsize;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use u_cook_core::{
    Chef, Dish, DishCatalog, DishId, Screen, SwipeDirection, UserPreferences,
};
use uuid::Uuid;

use crate::cart::Cart;
use crate::filter_bar::{FilterBar, UnknownFilter};
use crate::navigator::{Navigator, View};
use crate::onboarding::{Advance, OnboardingFlow, Step, ValidationErrors};
use crate::swipe::{Settle, SettleTicket, SwipeEngine};

/// User-recoverable session errors. The session is unchanged when one is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("not available on the {actual} screen")]
    WrongScreen { expected: Screen, actual: Screen },
    #[error("the dish catalog is empty")]
    EmptyCatalog,
    #[error("no item number {0}")]
    NoSuchItem(usize),
    #[error("no chef selected")]
    NoChefSelected,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    UnknownFilter(#[from] UnknownFilter),
}

/// Result of resolving a swipe gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeResolution {
    /// The gesture was applied. `added` is the dish put in the cart by a
    /// right swipe.
    Accepted {
        ticket: SettleTicket,
        added: Option<DishId>,
    },
    /// A previous swipe is still settling.
    Ignored,
}

struct MainScreen {
    swipe: SwipeEngine,
    filters: FilterBar,
}

/// Serializable view of everything the presentation layer draws.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub session_id: Uuid,
    pub screen: Screen,
    pub preferences: Option<UserPreferences>,
    pub cart: Cart,
    pub cart_count: usize,
    pub selected_chef: Option<Chef>,
    pub current_dish: Option<Dish>,
    pub current_dish_index: Option<usize>,
    pub swipe_direction: Option<SwipeDirection>,
    pub filters: Vec<&'static str>,
    pub onboarding_step: Option<Step>,
}

/// A single-user session over a dish catalog.
pub struct Session {
    id: Uuid,
    catalog: Arc<dyn DishCatalog>,
    catalog_len: NonZeroUsize,
    navigator: Navigator,
    onboarding: Option<OnboardingFlow>,
    main: Option<MainScreen>,
    next_engine_id: u64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("catalog_len", &self.catalog_len)
            .field("navigator", &self.navigator)
            .field("swipe", &self.main.as_ref().map(|main| &main.swipe))
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session on the onboarding screen.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCatalog`] if the catalog has no dishes.
    pub fn new(catalog: Arc<dyn DishCatalog>) -> Result<Self, SessionError> {
        let catalog_len = NonZeroUsize::new(catalog.len()).ok_or(SessionError::EmptyCatalog)?;
        let id = Uuid::new_v4();
        info!(session_id = %id, dishes = catalog_len.get(), "Session started");

        let mut session = Self {
            id,
            catalog,
            catalog_len,
            navigator: Navigator::new(),
            onboarding: None,
            main: None,
            next_engine_id: 0,
        };
        session.sync_screen_state();
        Ok(session)
    }

    // =========================================================================
    // Navigator operations
    // =========================================================================

    /// Store preferences and enter the main screen.
    pub fn complete_onboarding(&mut self, preferences: UserPreferences) {
        self.navigator.complete_onboarding(preferences);
        self.sync_screen_state();
    }

    /// Append a dish to the cart.
    pub fn add_to_cart(&mut self, dish: Dish) {
        self.navigator.add_to_cart(dish);
    }

    /// Remove every cart entry with the given id.
    pub fn remove_from_cart(&mut self, id: &DishId) -> usize {
        self.navigator.remove_from_cart(id)
    }

    /// Select a chef and open their profile.
    pub fn show_chef(&mut self, chef: Chef) {
        self.navigator.show_chef(chef);
        self.sync_screen_state();
    }

    /// Switch screens unconditionally.
    pub fn navigate(&mut self, screen: Screen) {
        self.navigator.navigate(screen);
        self.sync_screen_state();
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    /// The onboarding form, while the onboarding screen is active.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WrongScreen`] on any other screen.
    pub fn onboarding_mut(&mut self) -> Result<&mut OnboardingFlow, SessionError> {
        let actual = self.screen();
        self.onboarding.as_mut().ok_or(SessionError::WrongScreen {
            expected: Screen::Onboarding,
            actual,
        })
    }

    /// Press Next on the onboarding form.
    ///
    /// Returns the new step, or `None` once the wizard completed and the
    /// main screen is active.
    ///
    /// # Errors
    ///
    /// Returns validation errors from the identity step, or
    /// [`SessionError::WrongScreen`] outside onboarding.
    pub fn advance_onboarding(&mut self) -> Result<Option<Step>, SessionError> {
        match self.onboarding_mut()?.advance()? {
            Advance::Next(step) => Ok(Some(step)),
            Advance::Complete(preferences) => {
                self.complete_onboarding(preferences);
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Swipe engine
    // =========================================================================

    /// Resolve a gesture on the current dish.
    ///
    /// A right swipe adds the dish to the cart before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WrongScreen`] outside the main screen.
    pub fn resolve_swipe(
        &mut self,
        direction: SwipeDirection,
    ) -> Result<SwipeResolution, SessionError> {
        let actual = self.screen();
        let main = self.main.as_mut().ok_or(SessionError::WrongScreen {
            expected: Screen::Main,
            actual,
        })?;

        let index = main.swipe.index();
        let Some(ticket) = main.swipe.resolve(direction) else {
            return Ok(SwipeResolution::Ignored);
        };

        let added = if direction.adds_to_cart() {
            let dish = self
                .catalog
                .get(index)
                .cloned()
                .ok_or(SessionError::NoSuchItem(index))?;
            let id = dish.id.clone();
            self.navigator.add_to_cart(dish);
            Some(id)
        } else {
            None
        };

        Ok(SwipeResolution::Accepted { ticket, added })
    }

    /// Finish a swipe after its settle delay.
    ///
    /// Tickets from a swipe engine that no longer exists are ignored.
    pub fn settle_swipe(&mut self, ticket: SettleTicket) -> Settle {
        match self.main.as_mut() {
            Some(main) => main.swipe.settle(ticket),
            None => {
                debug!(engine = ticket.engine(), "Settle after main screen closed");
                Settle::Stale
            }
        }
    }

    /// Open the chef of the dish on screen.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WrongScreen`] outside the main screen.
    pub fn show_current_chef(&mut self) -> Result<(), SessionError> {
        let chef = self
            .current_dish()
            .map(|dish| dish.chef.clone())
            .ok_or(SessionError::WrongScreen {
                expected: Screen::Main,
                actual: self.screen(),
            })?;
        self.show_chef(chef);
        Ok(())
    }

    /// Toggle a filter in the main screen's filter bar.
    ///
    /// # Errors
    ///
    /// Returns an error outside the main screen or for an unknown filter.
    pub fn toggle_filter(&mut self, id: &str) -> Result<bool, SessionError> {
        let actual = self.screen();
        let main = self.main.as_mut().ok_or(SessionError::WrongScreen {
            expected: Screen::Main,
            actual,
        })?;
        Ok(main.filters.toggle(id)?)
    }

    // =========================================================================
    // Menu, chef and cart views
    // =========================================================================

    /// Open the chef of the `number`th menu dish (1-based).
    ///
    /// # Errors
    ///
    /// Returns an error outside the menu or for an unknown number.
    pub fn show_menu_chef(&mut self, number: usize) -> Result<(), SessionError> {
        self.expect_screen(Screen::Menu)?;
        let chef = Self::nth(self.catalog.dishes().iter(), number)?.chef.clone();
        self.show_chef(chef);
        Ok(())
    }

    /// Dishes cooked by the selected chef.
    #[must_use]
    pub fn chef_dishes(&self) -> Vec<&Dish> {
        self.navigator
            .selected_chef()
            .map(|chef| self.catalog.by_chef(&chef.id).collect())
            .unwrap_or_default()
    }

    /// Add the `number`th dish of the selected chef to the cart (1-based).
    ///
    /// # Errors
    ///
    /// Returns an error outside the chef screen, without a selected chef, or
    /// for an unknown number.
    pub fn add_chef_dish(&mut self, number: usize) -> Result<DishId, SessionError> {
        self.expect_screen(Screen::Chef)?;
        if self.navigator.selected_chef().is_none() {
            return Err(SessionError::NoChefSelected);
        }
        let dish = Self::nth(self.chef_dishes().into_iter(), number)?.clone();
        let id = dish.id.clone();
        self.navigator.add_to_cart(dish);
        Ok(id)
    }

    /// Remove the `number`th grouped cart line (1-based) and every entry of
    /// that dish.
    ///
    /// # Errors
    ///
    /// Returns an error outside the cart screen or for an unknown number.
    pub fn remove_cart_line(&mut self, number: usize) -> Result<usize, SessionError> {
        self.expect_screen(Screen::Cart)?;
        let lines = self.navigator.cart().lines();
        let id = Self::nth(lines.iter().map(|line| &line.dish), number)?.id.clone();
        Ok(self.navigator.remove_from_cart(&id))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.navigator.screen()
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        self.navigator.view()
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn DishCatalog {
        self.catalog.as_ref()
    }

    #[must_use]
    pub const fn onboarding(&self) -> Option<&OnboardingFlow> {
        self.onboarding.as_ref()
    }

    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.navigator.cart_count()
    }

    /// The dish on the swipe card, while the main screen is active.
    #[must_use]
    pub fn current_dish(&self) -> Option<&Dish> {
        self.current_dish_index()
            .and_then(|index| self.catalog.get(index))
    }

    #[must_use]
    pub fn current_dish_index(&self) -> Option<usize> {
        self.main.as_ref().map(|main| main.swipe.index())
    }

    #[must_use]
    pub fn swipe_direction(&self) -> Option<SwipeDirection> {
        self.main.as_ref().and_then(|main| main.swipe.direction())
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.main
            .as_ref()
            .is_some_and(|main| main.swipe.is_settling())
    }

    /// Active filters, while the main screen is active.
    #[must_use]
    pub fn active_filters(&self) -> Vec<&'static str> {
        self.main
            .as_ref()
            .map(|main| main.filters.active())
            .unwrap_or_default()
    }

    /// Capture the current presentation tuple.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            session_id: self.id,
            screen: self.screen(),
            preferences: self.navigator.preferences().cloned(),
            cart: self.navigator.cart().clone(),
            cart_count: self.cart_count(),
            selected_chef: self.navigator.selected_chef().cloned(),
            current_dish: self.current_dish().cloned(),
            current_dish_index: self.current_dish_index(),
            swipe_direction: self.swipe_direction(),
            filters: self.active_filters(),
            onboarding_step: self.onboarding.as_ref().map(OnboardingFlow::step),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Create or drop screen-local state to match the active screen.
    fn sync_screen_state(&mut self) {
        let screen = self.screen();

        match (screen, self.onboarding.is_some()) {
            (Screen::Onboarding, false) => self.onboarding = Some(OnboardingFlow::new()),
            (Screen::Onboarding, true) | (_, false) => {}
            (_, true) => self.onboarding = None,
        }

        match (screen, self.main.is_some()) {
            (Screen::Main, false) => {
                let id = self.next_engine_id;
                self.next_engine_id += 1;
                debug!(engine = id, "Main screen opened");
                self.main = Some(MainScreen {
                    swipe: SwipeEngine::new(id, self.catalog_len),
                    filters: FilterBar::new(),
                });
            }
            (Screen::Main, true) | (_, false) => {}
            (_, true) => {
                debug!("Main screen closed");
                self.main = None;
            }
        }
    }

    /// Fail unless `expected` is the active screen.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WrongScreen`] on any other screen.
    pub fn expect_screen(&self, expected: Screen) -> Result<(), SessionError> {
        let actual = self.screen();
        if actual == expected {
            Ok(())
        } else {
            Err(SessionError::WrongScreen { expected, actual })
        }
    }

    fn nth<'a>(
        mut items: impl Iterator<Item = &'a Dish>,
        number: usize,
    ) -> Result<&'a Dish, SessionError> {
        number
            .checked_sub(1)
            .and_then(|index| items.nth(index))
            .ok_or(SessionError::NoSuchItem(number))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use u_cook_core::ChefId;

    use super::*;
    use crate::catalog::Catalog;

    fn session() -> Session {
        Session::new(Arc::new(Catalog::builtin().unwrap())).unwrap()
    }

    fn onboarded() -> Session {
        let mut session = session();
        let form = session.onboarding_mut().unwrap();
        form.set_name("Anna");
        form.set_phone("9991234567");
        while session.advance_onboarding().unwrap().is_some() {}
        session
    }

    fn swipe_and_settle(session: &mut Session, direction: SwipeDirection) {
        match session.resolve_swipe(direction).unwrap() {
            SwipeResolution::Accepted { ticket, .. } => {
                assert!(matches!(session.settle_swipe(ticket), Settle::Advanced(_)));
            }
            SwipeResolution::Ignored => panic!("swipe ignored"),
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Session::new(Arc::new(Vec::<Dish>::new()));
        assert!(matches!(result, Err(SessionError::EmptyCatalog)));
    }

    #[test]
    fn test_onboarding_to_main() {
        let session = onboarded();
        assert_eq!(session.screen(), Screen::Main);
        assert!(session.onboarding().is_none());
        assert_eq!(session.current_dish_index(), Some(0));
        assert_eq!(
            session.navigator().preferences().unwrap().phone.as_str(),
            "+79991234567"
        );
    }

    #[test]
    fn test_onboarding_rejects_bad_identity() {
        let mut session = session();
        let err = session.advance_onboarding().unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert_eq!(session.screen(), Screen::Onboarding);
    }

    #[test]
    fn test_right_swipe_adds_before_settle() {
        let mut session = onboarded();
        let resolution = session.resolve_swipe(SwipeDirection::Right).unwrap();

        assert_eq!(session.cart_count(), 1);
        assert_eq!(session.current_dish_index(), Some(0));
        assert_eq!(session.swipe_direction(), Some(SwipeDirection::Right));
        assert!(matches!(
            resolution,
            SwipeResolution::Accepted { added: Some(ref id), .. } if *id == DishId::new("1")
        ));
    }

    #[test]
    fn test_left_swipe_does_not_add() {
        let mut session = onboarded();
        swipe_and_settle(&mut session, SwipeDirection::Left);
        assert_eq!(session.cart_count(), 0);
        assert_eq!(session.current_dish_index(), Some(1));
    }

    #[test]
    fn test_index_after_n_swipes() {
        let mut session = onboarded();
        for n in 1..=7 {
            swipe_and_settle(&mut session, SwipeDirection::Left);
            assert_eq!(session.current_dish_index(), Some(n % 3));
        }
    }

    #[test]
    fn test_rapid_second_swipe_ignored() {
        let mut session = onboarded();
        session.resolve_swipe(SwipeDirection::Right).unwrap();
        let second = session.resolve_swipe(SwipeDirection::Right).unwrap();
        assert_eq!(second, SwipeResolution::Ignored);
        assert_eq!(session.cart_count(), 1);
    }

    #[test]
    fn test_settle_after_leaving_main_is_ignored() {
        let mut session = onboarded();
        swipe_and_settle(&mut session, SwipeDirection::Left);

        let SwipeResolution::Accepted { ticket, .. } =
            session.resolve_swipe(SwipeDirection::Left).unwrap()
        else {
            panic!("swipe ignored");
        };
        session.navigate(Screen::Menu);
        assert_eq!(session.settle_swipe(ticket), Settle::Stale);

        session.navigate(Screen::Main);
        assert_eq!(session.settle_swipe(ticket), Settle::Stale);
        assert_eq!(session.current_dish_index(), Some(0));
        assert!(!session.is_settling());
    }

    #[test]
    fn test_swipe_outside_main() {
        let mut session = session();
        assert!(matches!(
            session.resolve_swipe(SwipeDirection::Left),
            Err(SessionError::WrongScreen { expected: Screen::Main, .. })
        ));
    }

    #[test]
    fn test_show_current_chef() {
        let mut session = onboarded();
        swipe_and_settle(&mut session, SwipeDirection::Left);
        session.show_current_chef().unwrap();
        assert_eq!(session.screen(), Screen::Chef);
        assert_eq!(
            session.navigator().selected_chef().unwrap().id,
            ChefId::new("2")
        );
    }

    #[test]
    fn test_chef_without_selection_is_blank() {
        let mut session = onboarded();
        session.navigate(Screen::Chef);
        assert_eq!(session.view(), View::Blank);
        assert!(session.chef_dishes().is_empty());
        assert!(matches!(
            session.add_chef_dish(1),
            Err(SessionError::NoChefSelected)
        ));
    }

    #[test]
    fn test_menu_chef_and_add() {
        let mut session = onboarded();
        session.navigate(Screen::Menu);
        assert!(matches!(
            session.show_menu_chef(4),
            Err(SessionError::NoSuchItem(4))
        ));
        session.show_menu_chef(3).unwrap();
        assert_eq!(session.screen(), Screen::Chef);

        let id = session.add_chef_dish(1).unwrap();
        assert_eq!(id, DishId::new("3"));
        assert_eq!(session.cart_count(), 1);
        assert!(session.add_chef_dish(0).is_err());
    }

    #[test]
    fn test_remove_cart_line_removes_all_copies() {
        let mut session = onboarded();
        let dish = session.catalog().dishes()[0].clone();
        session.add_to_cart(dish.clone());
        session.add_to_cart(dish);
        session.navigate(Screen::Cart);

        assert_eq!(session.remove_cart_line(1).unwrap(), 2);
        assert_eq!(session.cart_count(), 0);
        assert!(matches!(
            session.remove_cart_line(1),
            Err(SessionError::NoSuchItem(1))
        ));
    }

    #[test]
    fn test_filters_reset_with_main_screen() {
        let mut session = onboarded();
        assert!(session.toggle_filter("quick").unwrap());
        assert_eq!(session.active_filters(), vec!["quick"]);

        session.navigate(Screen::Cart);
        assert!(session.active_filters().is_empty());
        assert!(session.toggle_filter("quick").is_err());

        session.navigate(Screen::Main);
        assert!(session.active_filters().is_empty());
    }

    #[test]
    fn test_snapshot() {
        let mut session = onboarded();
        session.resolve_swipe(SwipeDirection::Right).unwrap();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.screen, Screen::Main);
        assert_eq!(snapshot.cart_count, 1);
        assert_eq!(snapshot.swipe_direction, Some(SwipeDirection::Right));
        assert_eq!(snapshot.current_dish.unwrap().id, DishId::new("1"));

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["screen"], "main");
        assert_eq!(json["swipe_direction"], "right");
        assert_eq!(json["cart"][0]["id"], "1");
    }
}
