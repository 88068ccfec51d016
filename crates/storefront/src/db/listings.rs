//! Read-only queries over active UMKM and their available products.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use umkm_core::{DirectoryStats, Product, Umkm, UmkmId};

use super::RepositoryError;

const UMKM_COLUMNS: &str = "id, name, description, category, phone, whatsapp, address, \
     latitude, longitude, image_url, opening_hours, status, created_at, updated_at";

const PRODUCT_COLUMNS: &str =
    "id, umkm_id, name, description, price, image_url, status, created_at, updated_at";

/// Search and category filter for the public listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Case-insensitive substring matched against name, description and address.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

impl ListingFilter {
    /// Build a filter from raw query parameters, ignoring blank values.
    #[must_use]
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        let clean = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned)
        };
        Self {
            search: clean(search),
            category: clean(category),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none()
    }

    /// `ILIKE` pattern for the search term, with wildcards escaped.
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

/// An active listing for the sitemap.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SitemapEntry {
    pub id: UmkmId,
    pub updated_at: DateTime<Utc>,
}

/// Repository for public listing queries.
pub struct ListingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ListingRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active UMKM, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn active_umkm(&self, filter: &ListingFilter) -> Result<Vec<Umkm>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {UMKM_COLUMNS}
            FROM umkm
            WHERE status = 'ACTIVE'
              AND ($1::text IS NULL
                   OR name ILIKE $1
                   OR description ILIKE $1
                   OR address ILIKE $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC
            "
        );

        let rows = sqlx::query_as::<_, Umkm>(&sql)
            .bind(filter.search_pattern())
            .bind(filter.category.as_deref())
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// One active UMKM.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the UMKM does not exist or is
    /// inactive, `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(umkm_id = %id))]
    pub async fn active_umkm_by_id(&self, id: UmkmId) -> Result<Umkm, RepositoryError> {
        let sql = format!("SELECT {UMKM_COLUMNS} FROM umkm WHERE id = $1 AND status = 'ACTIVE'");

        sqlx::query_as::<_, Umkm>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Available products of an UMKM, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(umkm_id = %umkm_id))]
    pub async fn available_products(&self, umkm_id: UmkmId) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE umkm_id = $1 AND status = 'AVAILABLE'
            ORDER BY created_at ASC
            "
        );

        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(umkm_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Distinct categories among active UMKM, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r"
            SELECT DISTINCT category
            FROM umkm
            WHERE status = 'ACTIVE' AND category IS NOT NULL AND category <> ''
            ORDER BY category
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(category,)| category).collect())
    }

    /// Counts shown on the home page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DirectoryStats, RepositoryError> {
        let stats = sqlx::query_as::<_, DirectoryStats>(
            r"
            SELECT
                (SELECT COUNT(*) FROM umkm WHERE status = 'ACTIVE') AS active_umkm,
                (SELECT COUNT(*) FROM products WHERE status = 'AVAILABLE') AS available_products,
                (SELECT COUNT(DISTINCT category) FROM umkm
                 WHERE status = 'ACTIVE' AND category IS NOT NULL AND category <> '') AS categories
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(stats)
    }

    /// Active UMKM ids with their last update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, SitemapEntry>(
            "SELECT id, updated_at FROM umkm WHERE status = 'ACTIVE' ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// Escape `ILIKE` wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_ignores_blank_values() {
        let filter = ListingFilter::new(Some("   "), Some(""));
        assert!(filter.is_empty());
        assert_eq!(filter.search_pattern(), None);
    }

    #[test]
    fn test_filter_trims_values() {
        let filter = ListingFilter::new(Some(" nasi "), Some(" Kuliner"));
        assert_eq!(filter.search.as_deref(), Some("nasi"));
        assert_eq!(filter.category.as_deref(), Some("Kuliner"));
        assert_eq!(filter.search_pattern().as_deref(), Some("%nasi%"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("kopi"), "kopi");
    }
}
