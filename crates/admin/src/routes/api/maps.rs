//! Map-link preview API.
//!
//! The UMKM form posts the pasted link here to show the admin what will be
//! stored before saving.

#![allow(clippy::used_underscore_binding)]

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use umkm_core::Coordinates;
use umkm_core::maps::{extract_coordinates_resolving, is_shortened_link, is_valid_link};

use crate::{middleware::RequireAdminAuth, state::AppState};

/// Build the maps router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/maps/parse", post(parse_link))
}

/// Request for parsing a map link.
#[derive(Debug, Deserialize)]
pub struct ParseLinkRequest {
    pub url: String,
}

/// What the link yielded.
#[derive(Debug, Serialize, PartialEq)]
pub struct ParseLinkResponse {
    /// The link is from the map service family.
    pub valid: bool,
    /// The link is a shortened one that needed a redirect.
    pub shortened: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Feedback line for the form.
    pub message: String,
}

impl ParseLinkResponse {
    /// Describe the outcome of extracting from `url`.
    #[must_use]
    pub fn describe(url: &str, coordinates: Option<Coordinates>) -> Self {
        let valid = is_valid_link(url);
        let shortened = is_shortened_link(url);

        let message = match (coordinates, valid, shortened) {
            (Some(c), _, _) => format!("Koordinat ditemukan: {c}"),
            (None, true, true) => {
                "Link pendek tidak dapat dibuka. Isi latitude dan longitude secara manual"
                    .to_string()
            }
            (None, true, false) => "Koordinat tidak ditemukan di link ini".to_string(),
            (None, false, _) => "Bukan link Google Maps".to_string(),
        };

        Self {
            valid,
            shortened,
            coordinates,
            message,
        }
    }
}

/// Extract coordinates from a pasted link.
///
/// POST /api/maps/parse
#[instrument(skip(_admin, state, body))]
pub async fn parse_link(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<ParseLinkRequest>,
) -> Json<ParseLinkResponse> {
    let url = body.url.trim();
    let coordinates = extract_coordinates_resolving(url, state.maps_resolver()).await;
    tracing::debug!(found = coordinates.is_some(), "Parsed map link");

    Json(ParseLinkResponse::describe(url, coordinates))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_found() {
        let coordinates = Coordinates::new(-4.0098, 119.6231).unwrap();
        let response = ParseLinkResponse::describe(
            "https://maps.google.com/?q=-4.0098,119.6231",
            Some(coordinates),
        );
        assert!(response.valid);
        assert!(!response.shortened);
        assert_eq!(response.message, "Koordinat ditemukan: -4.0098,119.6231");
    }

    #[test]
    fn test_describe_unresolved_short_link_is_still_valid() {
        let response = ParseLinkResponse::describe("https://maps.app.goo.gl/abc123", None);
        assert!(response.valid);
        assert!(response.shortened);
        assert!(response.coordinates.is_none());
    }

    #[test]
    fn test_describe_marker_outside_host_is_not_shortened() {
        let response = ParseLinkResponse::describe(
            "http://169.254.169.254/latest/meta-data?next=maps.app.goo.gl",
            None,
        );
        assert!(!response.shortened);
        assert_eq!(response.message, "Koordinat tidak ditemukan di link ini");
    }

    #[test]
    fn test_describe_not_a_map_link() {
        let response = ParseLinkResponse::describe("https://example.com", None);
        assert!(!response.valid);
        assert_eq!(response.message, "Bukan link Google Maps");
    }

    #[test]
    fn test_coordinates_omitted_from_json_when_missing() {
        let response = ParseLinkResponse::describe("not a url", None);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("coordinates").is_none());
        assert_eq!(json["valid"], false);
    }
}
