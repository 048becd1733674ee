//! Dashboard aggregate queries.

use serde::Serialize;
use sqlx::PgPool;

use lamore_core::{OrderStatus, Price};

use super::RepositoryError;

/// Aggregate store metrics for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: Price,
    pub pending_orders: i64,
}

/// Repository for dashboard aggregate queries.
pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    /// Create a new dashboard repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Compute the store metrics.
    ///
    /// Revenue covers confirmed, preparing, shipped, and delivered orders;
    /// pending and cancelled orders do not count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        let revenue_statuses: Vec<String> = OrderStatus::REVENUE_STATUSES
            .iter()
            .map(ToString::to_string)
            .collect();
        let total_revenue: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total), 0)::BIGINT FROM orders WHERE status = ANY($1)",
        )
        .bind(&revenue_statuses)
        .fetch_one(self.pool)
        .await?;

        let pending_orders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = $1")
                .bind(OrderStatus::Pending)
                .fetch_one(self.pool)
                .await?;

        Ok(DashboardStats {
            total_products,
            total_orders,
            total_revenue: Price::from_minor_units(total_revenue),
            pending_orders,
        })
    }
}
