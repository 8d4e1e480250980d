use askama::Template;
use u_cook_core::Price;

use crate::cart::CartLine;
use crate::error::Result;
use crate::session::Session;

#[derive(Template)]
#[template(path = "cart.txt")]
struct CartTemplate {
    count: usize,
    lines: Vec<CartLine>,
    total: Price,
}

pub(super) fn render(session: &Session) -> Result<String> {
    let cart = session.navigator().cart();
    let template = CartTemplate {
        count: cart.count(),
        lines: cart.lines(),
        total: cart.total(),
    };
    Ok(template.render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use u_cook_core::Screen;

    use super::*;
    use crate::catalog::Catalog;

    fn session() -> Session {
        let mut session = Session::new(Arc::new(Catalog::builtin().unwrap())).unwrap();
        session.navigate(Screen::Cart);
        session
    }

    #[test]
    fn test_empty_cart() {
        let text = render(&session()).unwrap();
        assert!(text.contains("Cart (0)"));
        assert!(text.contains("Your cart is empty."));
        assert!(!text.contains("Total"));
    }

    #[test]
    fn test_grouped_lines_and_total() {
        let mut session = session();
        let dishes = session.catalog().dishes().to_vec();
        session.add_to_cart(dishes[0].clone());
        session.add_to_cart(dishes[2].clone());
        session.add_to_cart(dishes[0].clone());
        let text = render(&session).unwrap();

        assert!(text.contains("Cart (3)"));
        assert!(text.contains("1. Pasta Carbonara x2  ₽1700"));
        assert!(text.contains("2. Home-style borscht x1  ₽420"));
        assert!(text.contains("Total: ₽2120"));
    }
}
