//! Map-link diagnostics.
//!
//! ```bash
//! umkm-cli maps "https://www.google.com/maps/place/@-4.0098,119.6231,17z"
//! umkm-cli maps "https://maps.app.goo.gl/abc123" --resolve
//! ```

use std::time::Duration;

use umkm_admin::services::HttpRedirectResolver;
use umkm_core::Coordinates;
use umkm_core::maps::{
    extract_coordinates, extract_coordinates_resolving, is_shortened_link, is_valid_link,
};

/// Timeout for the single redirect request.
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// What was learned about a link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkReport {
    pub valid: bool,
    pub shortened: bool,
    pub coordinates: Option<Coordinates>,
}

impl LinkReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("valid:       {}", self.valid),
            format!("shortened:   {}", self.shortened),
        ];
        match self.coordinates {
            Some(coordinates) => {
                lines.push(format!("latitude:    {}", coordinates.latitude));
                lines.push(format!("longitude:   {}", coordinates.longitude));
                lines.push(format!("map:         {}", coordinates.maps_url()));
            }
            None => lines.push("coordinates: none".to_string()),
        }
        lines
    }
}

/// Inspect a link, optionally following a shortened link once.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub async fn inspect(url: &str, resolve: bool) -> Result<(), Box<dyn std::error::Error>> {
    let url = url.trim();
    let coordinates = if resolve {
        let resolver = HttpRedirectResolver::new(RESOLVE_TIMEOUT)?;
        extract_coordinates_resolving(url, &resolver).await
    } else {
        extract_coordinates(url)
    };

    let report = LinkReport {
        valid: is_valid_link(url),
        shortened: is_shortened_link(url),
        coordinates,
    };

    if report.shortened && report.coordinates.is_none() && !resolve {
        tracing::info!("Shortened link: rerun with --resolve to follow it");
    }

    #[allow(clippy::print_stdout)]
    for line in report.lines() {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines_with_coordinates() {
        let report = LinkReport {
            valid: true,
            shortened: false,
            coordinates: Some(Coordinates::new(-4.0098, 119.6231).unwrap()),
        };
        let lines = report.lines();
        assert_eq!(lines.len(), 5);
        assert!(lines.contains(&"latitude:    -4.0098".to_string()));
        assert!(lines.contains(&"map:         https://maps.google.com/?q=-4.0098,119.6231".to_string()));
    }

    #[test]
    fn test_report_lines_without_coordinates() {
        let report = LinkReport {
            valid: false,
            shortened: false,
            coordinates: None,
        };
        assert_eq!(report.lines().last().unwrap(), "coordinates: none");
    }
}
