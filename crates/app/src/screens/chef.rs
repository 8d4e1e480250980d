use askama::Template;
use u_cook_core::{Chef, Dish};

use crate::error::Result;
use crate::filters;
use crate::session::Session;

#[derive(Template)]
#[template(path = "chef.txt")]
struct ChefTemplate<'a> {
    chef: &'a Chef,
    dishes: Vec<&'a Dish>,
}

pub(super) fn render(session: &Session, chef: &Chef) -> Result<String> {
    let template = ChefTemplate {
        chef,
        dishes: session.catalog().by_chef(&chef.id).collect(),
    };
    Ok(template.render()?)
}
