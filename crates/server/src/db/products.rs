//! Product repository for database operations.

use sqlx::{PgPool, QueryBuilder};

use lamore_core::{CategoryId, Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

const PRODUCT_COLUMNS: &str =
    "id, name, slug, description, price, category_id, stock, image_url, active, created_at, updated_at";

/// Filters for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    /// Restrict to a single category.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    /// Only products currently offered for sale.
    pub active_only: bool,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: CategoryId,
    pub stock: i32,
    pub image_url: Option<String>,
    pub active: bool,
}

/// Partial update for a product; `None` fields are left unchanged.
///
/// Nullable columns cannot be set back to NULL through a patch.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<CategoryId>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the given filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filters: &ProductFilters) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        let mut first = true;
        let mut and = |query: &mut QueryBuilder<'_, sqlx::Postgres>| {
            query.push(if first { " WHERE " } else { " AND " });
            first = false;
        };

        if filters.active_only {
            and(&mut query);
            query.push("active = TRUE");
        }
        if let Some(category_id) = filters.category_id {
            and(&mut query);
            query.push("category_id = ").push_bind(category_id);
        }
        if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            and(&mut query);
            query
                .push("(name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        query.push(" ORDER BY created_at DESC");

        let products = query.build_query_as().fetch_all(self.pool).await?;
        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "INSERT INTO products (name, slug, description, price, category_id, stock, image_url, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.slug)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.category_id)
        .bind(new.stock)
        .bind(&new.image_url)
        .bind(new.active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(product)
    }

    /// Apply a partial update; fields left `None` keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist,
    /// `RepositoryError::Conflict` on a duplicate slug, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "UPDATE products SET
                 name = COALESCE($2, name),
                 slug = COALESCE($3, slug),
                 description = COALESCE($4, description),
                 price = COALESCE($5, price),
                 category_id = COALESCE($6, category_id),
                 stock = COALESCE($7, stock),
                 image_url = COALESCE($8, image_url),
                 active = COALESCE($9, active),
                 updated_at = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.slug)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(patch.category_id)
        .bind(patch.stock)
        .bind(&patch.image_url)
        .bind(patch.active)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// Products referenced by order items are kept; order history depends
    /// on them. Deactivate those via [`Self::update`] instead.
    ///
    /// # Returns
    ///
    /// `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product appears in an order.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "product has orders and cannot be deleted; deactivate it instead"
                            .to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
