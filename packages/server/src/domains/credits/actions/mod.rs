//! Credit ledger actions.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{error, info};

use crate::common::{AccountId, Actor, CoreError};
use crate::domains::accounts::models::Account;
use crate::domains::credits::models::{Balance, CreditLedger, Transaction};

/// Result of a credit purchase: the new balance plus the appended
/// transaction record.
#[derive(Debug, Clone)]
pub struct Purchase {
    pub balance: Balance,
    pub transaction: Transaction,
}

/// Purchase a credit package for a venue.
///
/// Appends the CREDIT_PURCHASE transaction, then increments the ledger
/// total. The two writes are not one database transaction; a crash in
/// between leaves a logged money record without credits, and there is no
/// dedup key, so a blind client retry double-purchases.
pub async fn purchase_credits(
    actor: &Actor,
    venue_id: AccountId,
    credits: i32,
    amount: Decimal,
    pool: &PgPool,
) -> Result<Purchase, CoreError> {
    actor.require_venue(venue_id)?;

    if credits <= 0 {
        return Err(CoreError::Validation("credits must be positive".to_string()));
    }
    if amount < Decimal::ZERO {
        return Err(CoreError::Validation("amount must not be negative".to_string()));
    }

    if Account::find_venue(venue_id, pool).await?.is_none() {
        return Err(CoreError::NotFound("venue"));
    }

    let transaction = Transaction::record_purchase(venue_id, amount, pool).await?;

    let balance = match CreditLedger::purchase(venue_id, credits, pool).await {
        Ok(balance) => balance,
        Err(e) => {
            error!(
                venue_id = %venue_id,
                transaction_id = %transaction.id,
                error = %e,
                "Purchase transaction recorded but ledger credit failed"
            );
            return Err(e);
        }
    };

    info!(venue_id = %venue_id, credits, %amount, "Credits purchased");

    Ok(Purchase {
        balance,
        transaction,
    })
}

/// A venue's current balance. Absent ledger rows read as all-zero.
pub async fn get_balance(venue_id: AccountId, pool: &PgPool) -> Result<Balance, CoreError> {
    CreditLedger::balance(venue_id, pool).await
}

/// Transaction history for a venue (owner or admin).
pub async fn transactions_for_venue(
    actor: &Actor,
    venue_id: AccountId,
    pool: &PgPool,
) -> Result<Vec<Transaction>, CoreError> {
    actor.require_venue(venue_id)?;
    Transaction::for_venue(venue_id, pool).await
}

/// Record a provider's membership payment (admin back-office).
pub async fn record_membership_payment(
    actor: &Actor,
    provider_id: AccountId,
    amount: Decimal,
    pool: &PgPool,
) -> Result<Transaction, CoreError> {
    actor.require_admin()?;

    if amount < Decimal::ZERO {
        return Err(CoreError::Validation("amount must not be negative".to_string()));
    }
    if Account::find_provider(provider_id, pool).await?.is_none() {
        return Err(CoreError::NotFound("provider"));
    }

    let transaction = Transaction::record_membership(provider_id, amount, pool).await?;
    info!(provider_id = %provider_id, %amount, "Membership payment recorded");

    Ok(transaction)
}
