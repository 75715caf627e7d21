use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;

use crate::common::{AccountId, BookingId, CoreError};

/// Booking status enum for type-safe querying
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Terminal states admit no further transitions. `Confirmed` is not
    /// terminal: a venue can still cancel it.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Rejected => write!(f, "rejected"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "rejected" => Ok(BookingStatus::Rejected),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(anyhow::anyhow!("Invalid booking status: {}", s)),
        }
    }
}

/// Booking model - SQL persistence layer
///
/// Jointly owned by a venue and a provider; mutated only through the
/// transition actions, never deleted. Terminal rows stay around for
/// history and feedback.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: BookingId,
    pub venue_id: AccountId,
    pub provider_id: AccountId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub credits_reserved: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new booking
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub venue_id: AccountId,
    pub provider_id: AccountId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub credits_reserved: i32,
}

impl Booking {
    /// The booking's status, parsed.
    pub fn status(&self) -> Result<BookingStatus, CoreError> {
        BookingStatus::from_str(&self.status).map_err(CoreError::Internal)
    }

    /// Insert a new booking in `pending`.
    pub async fn insert(input: CreateBooking, pool: &PgPool) -> Result<Self, CoreError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO bookings (id, venue_id, provider_id, start_time, end_time, status, credits_reserved)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(BookingId::new())
        .bind(input.venue_id)
        .bind(input.provider_id)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(BookingStatus::Pending.to_string())
        .bind(input.credits_reserved)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find booking by ID
    pub async fn find_by_id(id: BookingId, pool: &PgPool) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Compare-and-swap the status.
    ///
    /// Returns the updated row only if the booking was still in `from`
    /// when the update ran. A lost race (or a repeated transition) matches
    /// zero rows and returns None, which is what guarantees at most one
    /// ledger release per booking.
    pub async fn transition_status(
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "UPDATE bookings
             SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(from.to_string())
        .bind(to.to_string())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// All bookings requested by a venue, newest first.
    pub async fn for_venue(venue_id: AccountId, pool: &PgPool) -> Result<Vec<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bookings WHERE venue_id = $1 ORDER BY created_at DESC",
        )
        .bind(venue_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// All bookings addressed to a provider, newest first.
    pub async fn for_provider(
        provider_id: AccountId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bookings WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
