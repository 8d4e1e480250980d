//! Screen and gesture tags.

use serde::{Deserialize, Serialize};

/// The screen currently shown to the user.
///
/// Exactly one screen is active at a time. Onboarding is the initial screen;
/// there is no terminal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Onboarding,
    Main,
    Menu,
    Chef,
    Cart,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Onboarding => write!(f, "onboarding"),
            Self::Main => write!(f, "main"),
            Self::Menu => write!(f, "menu"),
            Self::Chef => write!(f, "chef"),
            Self::Cart => write!(f, "cart"),
        }
    }
}

impl std::str::FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onboarding" => Ok(Self::Onboarding),
            "main" => Ok(Self::Main),
            "menu" => Ok(Self::Menu),
            "chef" => Ok(Self::Chef),
            "cart" => Ok(Self::Cart),
            _ => Err(format!("invalid screen: {s}")),
        }
    }
}

/// Direction of a resolved swipe gesture.
///
/// `Left` skips the dish, `Right` adds it to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Whether this gesture adds the dish to the cart.
    #[must_use]
    pub const fn adds_to_cart(self) -> bool {
        matches!(self, Self::Right)
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_screen_is_onboarding() {
        assert_eq!(Screen::default(), Screen::Onboarding);
    }

    #[test]
    fn test_screen_round_trips_through_display() {
        for screen in [
            Screen::Onboarding,
            Screen::Main,
            Screen::Menu,
            Screen::Chef,
            Screen::Cart,
        ] {
            assert_eq!(screen.to_string().parse::<Screen>().unwrap(), screen);
        }
        assert!("checkout".parse::<Screen>().is_err());
    }

    #[test]
    fn test_only_right_adds_to_cart() {
        assert!(SwipeDirection::Right.adds_to_cart());
        assert!(!SwipeDirection::Left.adds_to_cart());
    }
}
