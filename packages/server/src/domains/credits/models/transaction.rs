use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AccountId, CoreError, TransactionId};

/// Transaction type enum for type-safe querying
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    CreditPurchase,
    Membership,
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxType::CreditPurchase => write!(f, "credit_purchase"),
            TxType::Membership => write!(f, "membership"),
        }
    }
}

impl std::str::FromStr for TxType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "credit_purchase" => Ok(TxType::CreditPurchase),
            "membership" => Ok(TxType::Membership),
            _ => Err(anyhow::anyhow!("Invalid transaction type: {}", s)),
        }
    }
}

/// Transaction model - SQL persistence layer
///
/// Append-only money log. Rows are never mutated or deleted, and nothing
/// in the core reads them to gate behavior.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: TransactionId,
    pub venue_id: Option<AccountId>,
    pub provider_id: Option<AccountId>,
    pub tx_type: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Append a credit purchase for a venue.
    pub async fn record_purchase(
        venue_id: AccountId,
        amount: Decimal,
        pool: &PgPool,
    ) -> Result<Self, CoreError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO transactions (id, venue_id, tx_type, amount)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(TransactionId::new())
        .bind(venue_id)
        .bind(TxType::CreditPurchase.to_string())
        .bind(amount)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Append a membership payment for a provider.
    pub async fn record_membership(
        provider_id: AccountId,
        amount: Decimal,
        pool: &PgPool,
    ) -> Result<Self, CoreError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO transactions (id, provider_id, tx_type, amount)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(TransactionId::new())
        .bind(provider_id)
        .bind(TxType::Membership.to_string())
        .bind(amount)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All transactions for a venue, newest first.
    pub async fn for_venue(venue_id: AccountId, pool: &PgPool) -> Result<Vec<Self>, CoreError> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM transactions WHERE venue_id = $1 ORDER BY created_at DESC",
        )
        .bind(venue_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
