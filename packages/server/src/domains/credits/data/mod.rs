use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::credits::models::{Balance, Transaction};

/// Credit balance data type (GraphQL)
#[derive(Debug, Clone, GraphQLObject)]
pub struct CreditBalanceData {
    pub total: i32,
    pub used: i32,
    pub available: i32,
}

impl From<Balance> for CreditBalanceData {
    fn from(balance: Balance) -> Self {
        Self {
            total: balance.total,
            used: balance.used,
            available: balance.available,
        }
    }
}

/// Transaction data type (GraphQL)
///
/// `amount` is serialized as a string to keep the 2dp money value exact.
#[derive(Debug, Clone, GraphQLObject)]
pub struct TransactionData {
    pub id: Uuid,
    pub venue_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub tx_type: String,
    pub amount: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionData {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id.into_uuid(),
            venue_id: tx.venue_id.map(|id| id.into_uuid()),
            provider_id: tx.provider_id.map(|id| id.into_uuid()),
            tx_type: tx.tx_type,
            amount: tx.amount.to_string(),
            created_at: tx.created_at,
        }
    }
}

/// Input for purchasing a credit package
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct PurchaseCreditsInput {
    pub venue_id: Uuid,
    pub credits: i32,
    /// Package price in the currency of record
    pub amount: f64,
}

/// Result of a credit purchase
#[derive(Debug, Clone, GraphQLObject)]
pub struct PurchaseResultData {
    pub balance: CreditBalanceData,
    pub transaction: TransactionData,
}
