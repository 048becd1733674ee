//! Address repository for database operations.
//!
//! The "at most one default per user" rule lives here: any write that sets
//! `is_default` first clears the flag on the user's other addresses, inside
//! the same transaction.

use sqlx::PgPool;

use lamore_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::Address;

const ADDRESS_COLUMNS: &str = "id, user_id, recipient_name, street, number, complement, \
     neighborhood, city, state, zip_code, is_default, created_at";

/// Input for creating an address.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub user_id: UserId,
    pub recipient_name: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub is_default: bool,
}

/// Partial update for an address; `None` fields are left unchanged.
///
/// Nullable columns cannot be set back to NULL through a patch.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub recipient_name: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub is_default: Option<bool>,
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's addresses, default first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses
             WHERE user_id = $1
             ORDER BY is_default DESC, created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Get an address by its ID.
    ///
    /// Ownership is not checked here; callers decide what non-ownership
    /// looks like to the outside (the API reports it as not-found).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// Create a new address for a user.
    ///
    /// If the new address is the default, the user's other defaults are
    /// cleared in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(&self, new: &NewAddress) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if new.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1")
                .bind(new.user_id)
                .execute(&mut *tx)
                .await?;
        }

        let address: Address = sqlx::query_as(&format!(
            "INSERT INTO addresses
                 (user_id, recipient_name, street, number, complement,
                  neighborhood, city, state, zip_code, is_default)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(&new.recipient_name)
        .bind(&new.street)
        .bind(&new.number)
        .bind(&new.complement)
        .bind(&new.neighborhood)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.zip_code)
        .bind(new.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(address)
    }

    /// Apply a partial update; fields left `None` keep their current value.
    ///
    /// If the patch sets `is_default`, the user's other defaults are cleared
    /// in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AddressId,
        user_id: UserId,
        patch: &AddressPatch,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if patch.is_default == Some(true) {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1 AND id != $2")
                .bind(user_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        let address: Option<Address> = sqlx::query_as(&format!(
            "UPDATE addresses SET
                 recipient_name = COALESCE($2, recipient_name),
                 street = COALESCE($3, street),
                 number = COALESCE($4, number),
                 complement = COALESCE($5, complement),
                 neighborhood = COALESCE($6, neighborhood),
                 city = COALESCE($7, city),
                 state = COALESCE($8, state),
                 zip_code = COALESCE($9, zip_code),
                 is_default = COALESCE($10, is_default)
             WHERE id = $1
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.recipient_name)
        .bind(&patch.street)
        .bind(&patch.number)
        .bind(&patch.complement)
        .bind(&patch.neighborhood)
        .bind(&patch.city)
        .bind(&patch.state)
        .bind(&patch.zip_code)
        .bind(patch.is_default)
        .fetch_optional(&mut *tx)
        .await?;

        let address = address.ok_or(RepositoryError::NotFound)?;
        tx.commit().await?;
        Ok(address)
    }

    /// Delete an address.
    ///
    /// # Returns
    ///
    /// `true` if the address was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: AddressId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
