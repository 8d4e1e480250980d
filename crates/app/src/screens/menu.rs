use askama::Template;
use u_cook_core::Dish;

use crate::error::Result;
use crate::filters;
use crate::session::Session;

#[derive(Template)]
#[template(path = "menu.txt")]
struct MenuTemplate<'a> {
    dishes: &'a [Dish],
}

pub(super) fn render(session: &Session) -> Result<String> {
    let template = MenuTemplate {
        dishes: session.catalog().dishes(),
    };
    Ok(template.render()?)
}
