use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AccountId, CoreError, WindowId};

/// Availability window model - SQL persistence layer
///
/// Provider-published open calendar ranges. Windows are never merged and
/// may overlap freely; booking creation only asks whether *any* window
/// covers the requested slot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AvailabilityWindow {
    pub id: WindowId,
    pub provider_id: AccountId,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityWindow {
    /// Publish a new open window for a provider.
    pub async fn publish(
        provider_id: AccountId,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self, CoreError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO availability_windows (id, provider_id, date_from, date_to)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(WindowId::new())
        .bind(provider_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Does any window cover the requested slot?
    pub async fn covering(
        provider_id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<bool, CoreError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM availability_windows
                WHERE provider_id = $1
                  AND date_from <= $2
                  AND date_to >= $3
             )",
        )
        .bind(provider_id)
        .bind(end)
        .bind(start)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// All windows published by a provider, earliest first.
    pub async fn for_provider(
        provider_id: AccountId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM availability_windows WHERE provider_id = $1 ORDER BY date_from ASC",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
