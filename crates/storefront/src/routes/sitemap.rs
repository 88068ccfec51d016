//! XML sitemap for search engines.

use std::fmt::Write as _;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::db::{ListingRepository, SitemapEntry};
use crate::error::Result;
use crate::state::AppState;

/// Serve `/sitemap.xml`.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Result<Response> {
    let entries = ListingRepository::new(state.pool())
        .sitemap_entries()
        .await?;
    let body = render_sitemap(&state.config().base_url, &entries, Utc::now());

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Render the home page (daily, priority 1.0) followed by every active UMKM
/// (weekly, priority 0.8).
#[must_use]
pub fn render_sitemap(base_url: &str, entries: &[SitemapEntry], now: DateTime<Utc>) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    push_url(&mut xml, &format!("{base_url}/"), now, "daily", "1.0");
    for entry in entries {
        push_url(
            &mut xml,
            &format!("{base_url}/umkm/{}", entry.id),
            entry.updated_at,
            "weekly",
            "0.8",
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, modified: DateTime<Utc>, freq: &str, priority: &str) {
    let _ = write!(
        xml,
        "  <url>\n    <loc>{loc}</loc>\n    <lastmod>{}</lastmod>\n    \
         <changefreq>{freq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n",
        modified.format("%Y-%m-%d")
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use umkm_core::UmkmId;

    use super::*;

    #[test]
    fn test_render_sitemap() {
        let now = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let id = UmkmId::new(uuid::Uuid::from_u128(42));
        let entries = vec![SitemapEntry {
            id,
            updated_at: Utc.with_ymd_and_hms(2026, 9, 12, 8, 30, 0).unwrap(),
        }];

        let xml = render_sitemap("https://umkm.example.id", &entries, now);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://umkm.example.id/</loc>"));
        assert!(xml.contains("<lastmod>2026-10-01</lastmod>"));
        assert!(xml.contains(&format!("<loc>https://umkm.example.id/umkm/{id}</loc>")));
        assert!(xml.contains("<lastmod>2026-09-12</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 1);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
