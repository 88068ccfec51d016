//! Product repository for database operations.

use sqlx::PgPool;
use tracing::instrument;

use umkm_core::{NewProduct, Product, ProductId, UmkmId};

use super::{PRODUCT_COLUMNS, RepositoryError};

/// Repository for product database operations.
///
/// Every lookup is scoped to the owning UMKM so a product can't be edited
/// through another UMKM's URL.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products of an UMKM regardless of status, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(umkm_id = %umkm_id))]
    pub async fn list_for_umkm(&self, umkm_id: UmkmId) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE umkm_id = $1 ORDER BY created_at ASC"
        );

        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(umkm_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Get one product of an UMKM.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the UMKM has no such product.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(umkm_id = %umkm_id, product_id = %id))]
    pub async fn get(&self, umkm_id: UmkmId, id: ProductId) -> Result<Product, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND umkm_id = $2");

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(umkm_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Insert a product for an UMKM.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including
    /// when the UMKM does not exist.
    #[instrument(skip(self, new), fields(umkm_id = %umkm_id, name = %new.name))]
    pub async fn create(
        &self,
        umkm_id: UmkmId,
        new: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO products (umkm_id, name, description, price, image_url, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(umkm_id)
            .bind(&new.name)
            .bind(new.description.as_deref())
            .bind(new.price)
            .bind(new.image_url.as_deref())
            .bind(new.status)
            .fetch_one(self.pool)
            .await?;

        Ok(product)
    }

    /// Replace every editable field of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the UMKM has no such product.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update), fields(umkm_id = %umkm_id, product_id = %id))]
    pub async fn update(
        &self,
        umkm_id: UmkmId,
        id: ProductId,
        update: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            UPDATE products
            SET name = $3, description = $4, price = $5, image_url = $6, status = $7,
                updated_at = NOW()
            WHERE id = $1 AND umkm_id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(umkm_id)
            .bind(&update.name)
            .bind(update.description.as_deref())
            .bind(update.price)
            .bind(update.image_url.as_deref())
            .bind(update.status)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete one product of an UMKM.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the UMKM has no such product.
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(umkm_id = %umkm_id, product_id = %id))]
    pub async fn delete(&self, umkm_id: UmkmId, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND umkm_id = $2")
            .bind(id)
            .bind(umkm_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
