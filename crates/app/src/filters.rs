//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use u_cook_core::CurrencyCode;

/// Formats a rating with one decimal and a star.
///
/// Usage in templates: `{{ dish.rating|rating }}` renders `★ 4.8`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn rating(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("★ {value:.1}"))
}

/// Formats a whole-ruble amount, such as a budget slider position.
///
/// Usage in templates: `{{ budget_min|rubles }}` renders `₽500`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn rubles(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{}{value}", CurrencyCode::RUB.symbol()))
}
