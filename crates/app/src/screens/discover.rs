use askama::Template;
use u_cook_core::{Dish, SwipeDirection};

use super::mark;
use crate::error::Result;
use crate::filter_bar::FILTER_IDS;
use crate::filters;
use crate::session::Session;

struct FilterChip {
    id: &'static str,
    mark: char,
}

#[derive(Template)]
#[template(path = "discover.txt")]
struct DiscoverTemplate<'a> {
    dish: &'a Dish,
    direction: Option<SwipeDirection>,
    cart_count: usize,
    chips: Vec<FilterChip>,
}

pub(super) fn render(session: &Session) -> Result<String> {
    let Some(dish) = session.current_dish() else {
        return Ok(String::new());
    };
    let active = session.active_filters();

    let template = DiscoverTemplate {
        dish,
        direction: session.swipe_direction(),
        cart_count: session.cart_count(),
        chips: FILTER_IDS
            .into_iter()
            .map(|id| FilterChip {
                id,
                mark: mark(active.contains(&id)),
            })
            .collect(),
    };
    Ok(template.render()?)
}
