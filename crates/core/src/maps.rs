//! Coordinate extraction from map-service links.
//!
//! Admins paste whatever link their phone's map app gave them. Three textual
//! shapes carry coordinates directly:
//!
//! ```text
//! https://maps.google.com/?q=-4.0098,119.6231              query parameter
//! https://www.google.com/maps/place/@-4.0098,119.6231,17z  at-sign segment
//! https://www.google.com/maps?q=-4.0098,119.6231           maps?q=
//! ```
//!
//! Shortened links (`maps.app.goo.gl/...`) carry nothing until followed, so
//! [`extract_coordinates_resolving`] asks a [`RedirectResolver`] for exactly
//! one redirect hop and then retries the textual shapes on the target.

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::types::Coordinates;

/// Host/path fragments that identify a link from the map service family.
const MAP_LINK_MARKERS: &[&str] = &[
    "maps.google.com",
    "google.com/maps",
    "maps.app.goo.gl",
    "goo.gl/maps",
];

/// Host serving shortened links from the map app.
const SHORT_LINK_HOST: &str = "maps.app.goo.gl";

/// Legacy shortener host; only its `/maps` paths are map links.
const LEGACY_SHORT_LINK_HOST: &str = "goo.gl";
const LEGACY_SHORT_LINK_PATH: &str = "/maps";

/// `q=` or `query=` parameter holding `<lat>,<lon>` (comma may be `%2C`).
static QUERY_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[?&])(?:q|query)=(-?\d+(?:\.\d*)?)(?:,|%2[Cc])(-?\d+(?:\.\d*)?)")
        .expect("Invalid regex")
});

/// `@<lat>,<lon>` segment from place URLs; anything after is ignored.
static AT_SIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(-?\d+(?:\.\d*)?),(-?\d+(?:\.\d*)?)").expect("Invalid regex"));

/// `maps?q=<lat>,<lon>`.
static MAPS_QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"maps\?q=(-?\d+(?:\.\d*)?),(-?\d+(?:\.\d*)?)").expect("Invalid regex")
});

/// A single link shape: returns coordinates if the input has that shape.
pub type Matcher = fn(&str) -> Option<Coordinates>;

/// Link shapes in priority order. The first one that matches wins, even if
/// a later shape would also match.
pub const MATCHERS: &[(&str, Matcher)] = &[
    ("query_param", match_query_param),
    ("at_sign", match_at_sign),
    ("maps_query", match_maps_query),
];

/// Extract coordinates from a map link without any network access.
///
/// Returns `None` for empty, malformed, or unrecognized input. A shape whose
/// numbers fail to parse or fall outside the valid range counts as no match
/// and the next shape is tried.
///
/// ```
/// use umkm_core::maps::extract_coordinates;
///
/// let coords = extract_coordinates("https://maps.google.com/?q=-4.0098,119.6231").unwrap();
/// assert_eq!((coords.latitude, coords.longitude), (-4.0098, 119.6231));
/// assert!(extract_coordinates("not a url").is_none());
/// ```
#[must_use]
pub fn extract_coordinates(url: &str) -> Option<Coordinates> {
    MATCHERS.iter().find_map(|(_, matcher)| matcher(url))
}

/// Whether `url` looks like a link from the map service family.
///
/// This is a cheap pre-check for choosing user feedback. A `true` result
/// does not promise that extraction will succeed.
#[must_use]
pub fn is_valid_link(url: &str) -> bool {
    MAP_LINK_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Whether `url` is a shortened map link that must be followed first.
///
/// Unlike [`is_valid_link`] this parses the URL and matches the host
/// exactly; markers in the path or query do not count.
#[must_use]
pub fn is_shortened_link(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    match parsed.host_str() {
        Some(SHORT_LINK_HOST) => true,
        Some(LEGACY_SHORT_LINK_HOST) => parsed.path().starts_with(LEGACY_SHORT_LINK_PATH),
        _ => false,
    }
}

/// Follows a single redirect for a shortened link.
///
/// Implementations perform one request, bounded by their own timeout, and
/// return the redirect target. They must not follow further hops.
pub trait RedirectResolver {
    type Error: std::error::Error;

    /// Resolve `url` to the location it redirects to.
    fn resolve(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Extract coordinates, following a shortened link once if needed.
///
/// The textual shapes are tried first. Only when none match and the link is
/// a shortened one is `resolver` consulted, and only the textual shapes are
/// tried on the result; a second shortened link is left unresolved. Any
/// resolver failure yields `None`.
pub async fn extract_coordinates_resolving<R>(url: &str, resolver: &R) -> Option<Coordinates>
where
    R: RedirectResolver + Sync + ?Sized,
{
    if let Some(coordinates) = extract_coordinates(url) {
        return Some(coordinates);
    }

    if !is_shortened_link(url) {
        return None;
    }

    let resolved = resolver.resolve(url).await.ok()?;
    extract_coordinates(&resolved)
}

fn match_query_param(url: &str) -> Option<Coordinates> {
    capture_pair(&QUERY_PARAM_RE, url)
}

fn match_at_sign(url: &str) -> Option<Coordinates> {
    capture_pair(&AT_SIGN_RE, url)
}

fn match_maps_query(url: &str) -> Option<Coordinates> {
    capture_pair(&MAPS_QUERY_RE, url)
}

/// Parse the first occurrence of `re` into validated coordinates.
fn capture_pair(re: &Regex, url: &str) -> Option<Coordinates> {
    let captures = re.captures(url)?;
    let latitude = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let longitude = captures.get(2)?.as_str().parse::<f64>().ok()?;
    Coordinates::new(latitude, longitude).ok()
}
