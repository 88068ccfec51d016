//! UMKM repository for database operations.

use sqlx::PgPool;
use tracing::instrument;

use umkm_core::{NewUmkm, Umkm, UmkmId};

use super::{RepositoryError, UMKM_COLUMNS};

/// An UMKM together with how many products it has.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UmkmWithCount {
    #[sqlx(flatten)]
    pub umkm: Umkm,
    pub product_count: i64,
}

/// Repository for UMKM database operations.
pub struct UmkmRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UmkmRepository<'a> {
    /// Create a new UMKM repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every UMKM regardless of status, newest first, with product counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_with_product_counts(&self) -> Result<Vec<UmkmWithCount>, RepositoryError> {
        let sql = r"
            SELECT u.*,
                   (SELECT COUNT(*) FROM products p WHERE p.umkm_id = u.id) AS product_count
            FROM umkm u
            ORDER BY u.created_at DESC
            ";

        let rows = sqlx::query_as::<_, UmkmWithCount>(sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Get an UMKM by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no UMKM has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(umkm_id = %id))]
    pub async fn get(&self, id: UmkmId) -> Result<Umkm, RepositoryError> {
        let sql = format!("SELECT {UMKM_COLUMNS} FROM umkm WHERE id = $1");

        sqlx::query_as::<_, Umkm>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Insert a new UMKM.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(&self, new: &NewUmkm) -> Result<Umkm, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO umkm (name, description, category, phone, whatsapp, address,
                              latitude, longitude, image_url, opening_hours, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {UMKM_COLUMNS}
            "
        );

        let umkm = sqlx::query_as::<_, Umkm>(&sql)
            .bind(&new.name)
            .bind(new.description.as_deref())
            .bind(new.category.as_deref())
            .bind(&new.phone)
            .bind(&new.whatsapp)
            .bind(&new.address)
            .bind(new.latitude)
            .bind(new.longitude)
            .bind(new.image_url.as_deref())
            .bind(new.opening_hours.as_deref())
            .bind(new.status)
            .fetch_one(self.pool)
            .await?;

        Ok(umkm)
    }

    /// Replace every editable field of an UMKM.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no UMKM has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update), fields(umkm_id = %id))]
    pub async fn update(&self, id: UmkmId, update: &NewUmkm) -> Result<Umkm, RepositoryError> {
        let sql = format!(
            r"
            UPDATE umkm
            SET name = $2, description = $3, category = $4, phone = $5, whatsapp = $6,
                address = $7, latitude = $8, longitude = $9, image_url = $10,
                opening_hours = $11, status = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING {UMKM_COLUMNS}
            "
        );

        sqlx::query_as::<_, Umkm>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(update.description.as_deref())
            .bind(update.category.as_deref())
            .bind(&update.phone)
            .bind(&update.whatsapp)
            .bind(&update.address)
            .bind(update.latitude)
            .bind(update.longitude)
            .bind(update.image_url.as_deref())
            .bind(update.opening_hours.as_deref())
            .bind(update.status)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete an UMKM and, through the foreign key, its products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no UMKM has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(umkm_id = %id))]
    pub async fn delete(&self, id: UmkmId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM umkm WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
