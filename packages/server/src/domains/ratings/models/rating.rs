use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AccountId, BookingId, CoreError, RatingId};

/// Rating model - SQL persistence layer
///
/// At most one per booking (unique index on `booking_id`), immutable once
/// created. `visible_to_provider` controls whether the numeric score is
/// ever exposed to the provider side; the text is always theirs to read.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rating {
    pub id: RatingId,
    pub booking_id: BookingId,
    pub venue_id: AccountId,
    pub provider_id: AccountId,
    pub stars: i32,
    pub text: String,
    pub visible_to_provider: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a rating
#[derive(Debug, Clone)]
pub struct CreateRating {
    pub booking_id: BookingId,
    pub venue_id: AccountId,
    pub provider_id: AccountId,
    pub stars: i32,
    pub text: String,
    pub visible_to_provider: bool,
}

impl Rating {
    /// Insert a rating, claiming the booking's single feedback slot.
    ///
    /// `ON CONFLICT DO NOTHING` against the unique index makes the
    /// one-per-booking rule atomic: the losing writer gets no row back.
    pub async fn insert_unique(
        input: CreateRating,
        pool: &PgPool,
    ) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO ratings (id, booking_id, venue_id, provider_id, stars, text, visible_to_provider)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (booking_id) DO NOTHING
             RETURNING *",
        )
        .bind(RatingId::new())
        .bind(input.booking_id)
        .bind(input.venue_id)
        .bind(input.provider_id)
        .bind(input.stars)
        .bind(&input.text)
        .bind(input.visible_to_provider)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find the rating for a booking, if any.
    pub async fn find_by_booking(
        booking_id: BookingId,
        pool: &PgPool,
    ) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM ratings WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All ratings received by a provider, newest first.
    pub async fn for_provider(
        provider_id: AccountId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM ratings WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Mean stars across all of a provider's ratings.
    pub async fn mean_stars_for_provider(
        provider_id: AccountId,
        pool: &PgPool,
    ) -> Result<Option<f64>, CoreError> {
        let (mean,): (Option<f64>,) = sqlx::query_as(
            "SELECT AVG(stars)::double precision FROM ratings WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_one(pool)
        .await?;

        Ok(mean)
    }
}
