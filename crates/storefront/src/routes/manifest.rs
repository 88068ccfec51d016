//! Web app manifest route handler.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Short name shown under the home-screen icon.
pub const SHORT_NAME: &str = "UMKM-GO";

const THEME_COLOR: &str = "#059669";
const BACKGROUND_COLOR: &str = "#f9fafb";

/// Serve the web app manifest so the directory can be installed.
pub async fn webmanifest(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        manifest(&state.config().site_name).to_string(),
    )
        .into_response()
}

/// Build the manifest document.
#[must_use]
pub fn manifest(site_name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": format!("{SHORT_NAME} {site_name}"),
        "short_name": SHORT_NAME,
        "description": "Direktori UMKM dan pemesanan lewat WhatsApp",
        "lang": "id",
        "start_url": "/",
        "scope": "/",
        "display": "standalone",
        "orientation": "portrait",
        "theme_color": THEME_COLOR,
        "background_color": BACKGROUND_COLOR,
        "icons": [
            {
                "src": "/static/icons/icon.svg",
                "sizes": "any",
                "type": "image/svg+xml",
                "purpose": "any maskable"
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_fields() {
        let value = manifest("UMKM Tiro Sompe");
        assert_eq!(value["name"], "UMKM-GO UMKM Tiro Sompe");
        assert_eq!(value["short_name"], SHORT_NAME);
        assert_eq!(value["start_url"], "/");
        assert_eq!(value["display"], "standalone");
        assert_eq!(value["icons"][0]["src"], "/static/icons/icon.svg");
    }
}
