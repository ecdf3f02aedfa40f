//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Local::now().year())
}

/// Order id as shown in the table, e.g. `#1001`.
///
/// Usage in templates: `{{ order.id|order_number }}`
#[askama::filter_fn]
pub fn order_number(id: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("#{id}"))
}
