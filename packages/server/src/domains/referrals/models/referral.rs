use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AccountId, CoreError, ReferralId};

/// Referral model - SQL persistence layer
///
/// One row per referred signup, created at invitee registration time.
/// Loyalty points live on the accounts themselves; this row is the record
/// of who referred whom and what the reward was.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Referral {
    pub id: ReferralId,
    pub inviter_account_id: AccountId,
    pub invitee_account_id: AccountId,
    pub reward_points: i32,
    pub created_at: DateTime<Utc>,
}

impl Referral {
    /// Insert a referral row. The unique index on `invitee_account_id`
    /// means a signup can only ever be referred once.
    pub async fn insert(
        inviter: AccountId,
        invitee: AccountId,
        reward_points: i32,
        pool: &PgPool,
    ) -> Result<Self, CoreError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO referrals (id, inviter_account_id, invitee_account_id, reward_points)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(ReferralId::new())
        .bind(inviter)
        .bind(invitee)
        .bind(reward_points)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Referrals credited to an inviter
    pub async fn for_inviter(
        inviter: AccountId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM referrals WHERE inviter_account_id = $1 ORDER BY created_at DESC",
        )
        .bind(inviter)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
