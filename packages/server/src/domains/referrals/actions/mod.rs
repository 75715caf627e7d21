//! Referral reward actions.

use sqlx::PgPool;
use tracing::{error, info};

use crate::common::{AccountId, CoreError};
use crate::domains::accounts::models::Account;
use crate::domains::referrals::models::Referral;

/// Loyalty points credited to each side of a successful referral.
pub const REFERRAL_REWARD_POINTS: i32 = 50;

/// Record a referral and credit loyalty points to both parties.
///
/// Three separate writes with no transaction spanning them: the referral
/// row, the inviter's points, the invitee's points. A failure partway
/// through leaves the reward state inconsistent; it is logged and surfaced
/// to the caller, not retried or rolled back.
pub async fn record_referral(
    inviter: AccountId,
    invitee: AccountId,
    points: i32,
    pool: &PgPool,
) -> Result<Referral, CoreError> {
    let referral = Referral::insert(inviter, invitee, points, pool).await?;

    if let Err(e) = Account::increment_loyalty(inviter, points, pool).await {
        error!(
            referral_id = %referral.id,
            inviter = %inviter,
            error = %e,
            "Referral recorded but inviter loyalty credit failed"
        );
        return Err(e);
    }

    if let Err(e) = Account::increment_loyalty(invitee, points, pool).await {
        error!(
            referral_id = %referral.id,
            invitee = %invitee,
            error = %e,
            "Referral recorded but invitee loyalty credit failed"
        );
        return Err(e);
    }

    info!(
        referral_id = %referral.id,
        inviter = %inviter,
        invitee = %invitee,
        points,
        "Referral recorded"
    );

    Ok(referral)
}
