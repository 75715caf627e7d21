use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AccountId, CoreError};

/// Credit ledger model - SQL persistence layer
///
/// One row per venue, created lazily on first purchase or reservation.
/// Invariant: `0 <= used <= total` at all times, backed by CHECK
/// constraints on the table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CreditLedger {
    pub venue_id: AccountId,
    pub total: i32,
    pub used: i32,
    pub updated_at: DateTime<Utc>,
}

/// A venue's balance as read by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub total: i32,
    pub used: i32,
    pub available: i32,
}

impl CreditLedger {
    fn balance_of(&self) -> Balance {
        Balance {
            total: self.total,
            used: self.used,
            available: self.total - self.used,
        }
    }

    /// Upsert the venue's row so conditional updates have a target.
    async fn ensure_row(venue_id: AccountId, pool: &PgPool) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO credit_ledgers (venue_id, total, used)
             VALUES ($1, 0, 0)
             ON CONFLICT (venue_id) DO NOTHING",
        )
        .bind(venue_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Current balance. An absent row reads as all-zero; never fails on
    /// missing venues.
    pub async fn balance(venue_id: AccountId, pool: &PgPool) -> Result<Balance, CoreError> {
        let row = sqlx::query_as::<_, Self>("SELECT * FROM credit_ledgers WHERE venue_id = $1")
            .bind(venue_id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|l| l.balance_of()).unwrap_or(Balance {
            total: 0,
            used: 0,
            available: 0,
        }))
    }

    /// Add purchased credits to the venue's total. Upsert semantics; no
    /// upper bound.
    pub async fn purchase(
        venue_id: AccountId,
        credits: i32,
        pool: &PgPool,
    ) -> Result<Balance, CoreError> {
        let ledger = sqlx::query_as::<_, Self>(
            "INSERT INTO credit_ledgers (venue_id, total, used)
             VALUES ($1, $2, 0)
             ON CONFLICT (venue_id)
             DO UPDATE SET total = credit_ledgers.total + EXCLUDED.total, updated_at = NOW()
             RETURNING *",
        )
        .bind(venue_id)
        .bind(credits)
        .fetch_one(pool)
        .await?;

        Ok(ledger.balance_of())
    }

    /// Reserve `credits` from the venue's available balance.
    ///
    /// The availability check and the increment are one conditional UPDATE,
    /// so two racing reservations can never jointly overdraw: the WHERE
    /// clause re-evaluates against the row as each writer sees it.
    pub async fn reserve(
        venue_id: AccountId,
        credits: i32,
        pool: &PgPool,
    ) -> Result<Balance, CoreError> {
        Self::ensure_row(venue_id, pool).await?;

        let updated = sqlx::query_as::<_, Self>(
            "UPDATE credit_ledgers
             SET used = used + $2, updated_at = NOW()
             WHERE venue_id = $1
               AND total - used >= $2
             RETURNING *",
        )
        .bind(venue_id)
        .bind(credits)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(ledger) => Ok(ledger.balance_of()),
            None => {
                let balance = Self::balance(venue_id, pool).await?;
                Err(CoreError::InsufficientCredits {
                    requested: credits,
                    available: balance.available,
                })
            }
        }
    }

    /// Return `credits` to the available pool, floored at zero used.
    ///
    /// Not idempotent: callers must guarantee at most one release per
    /// booking (the transition path does so with a status compare-and-swap).
    pub async fn release(
        venue_id: AccountId,
        credits: i32,
        pool: &PgPool,
    ) -> Result<Balance, CoreError> {
        Self::ensure_row(venue_id, pool).await?;

        let ledger = sqlx::query_as::<_, Self>(
            "UPDATE credit_ledgers
             SET used = GREATEST(used - $2, 0), updated_at = NOW()
             WHERE venue_id = $1
             RETURNING *",
        )
        .bind(venue_id)
        .bind(credits)
        .fetch_one(pool)
        .await?;

        Ok(ledger.balance_of())
    }
}
