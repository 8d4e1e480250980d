//! Text rendering of each screen.
//!
//! Every screen is an Askama template under `templates/`. The templates only
//! read session state; every gesture goes through [`crate::state::AppState`].

mod cart;
mod chef;
mod discover;
mod menu;
mod onboarding;

use crate::error::Result;
use crate::navigator::View;
use crate::session::Session;

/// Checkbox marker for selected and unselected options.
const fn mark(selected: bool) -> char {
    if selected { 'x' } else { ' ' }
}

/// Render the active screen.
///
/// The chef screen without a selected chef renders as an empty string.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render(session: &Session) -> Result<String> {
    match session.view() {
        View::Onboarding => onboarding::render(session),
        View::Main => discover::render(session),
        View::Menu => menu::render(session),
        View::Chef(chef) => chef::render(session, chef),
        View::Cart => cart::render(session),
        View::Blank => Ok(String::new()),
    }
}
