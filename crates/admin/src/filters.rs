//! Custom Askama template filters for admin pages.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Badge class for a status label.
///
/// Usage in templates: `{{ row.status|status_class }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn status_class(value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(badge_class(&value.to_string()))
}

fn badge_class(status: &str) -> &'static str {
    match status {
        "ACTIVE" | "AVAILABLE" => "badge badge-on",
        _ => "badge badge-off",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_class() {
        assert_eq!(badge_class("ACTIVE"), "badge badge-on");
        assert_eq!(badge_class("AVAILABLE"), "badge badge-on");
        assert_eq!(badge_class("INACTIVE"), "badge badge-off");
        assert_eq!(badge_class("UNAVAILABLE"), "badge badge-off");
    }
}
