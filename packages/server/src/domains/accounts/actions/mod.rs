//! Account registration actions.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::common::{is_unique_violation, CoreError, Role};
use crate::domains::accounts::models::{Account, CreateAccount};
use crate::domains::referrals;
use crate::domains::referrals::code::generate_unique_code;

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct RegisterAccount {
    pub identity_id: String,
    pub role: Role,
    pub display_name: String,
    pub invite_code: Option<String>,
}

/// Register a venue or provider account at signup time.
///
/// Generates the account's own invite code, persists the row, and if the
/// signup carried a valid existing invite code, records the referral and
/// credits both parties. An unknown invite code is logged and ignored; the
/// signup itself still succeeds.
pub async fn register_account(
    input: RegisterAccount,
    pool: &PgPool,
) -> Result<Account, CoreError> {
    if input.role == Role::Admin {
        return Err(CoreError::Validation(
            "accounts are registered as venue or provider".to_string(),
        ));
    }
    if input.display_name.trim().is_empty() {
        return Err(CoreError::Validation("display name must not be empty".to_string()));
    }
    if input.identity_id.trim().is_empty() {
        return Err(CoreError::Validation("identity id must not be empty".to_string()));
    }

    let own_code = generate_unique_code(&input.display_name, pool).await?;

    let mut account = Account::insert(
        CreateAccount {
            identity_id: input.identity_id,
            role: input.role,
            display_name: input.display_name,
            invite_code: own_code,
        },
        pool,
    )
    .await
    .map_err(|e| match e {
        CoreError::Database(db) if is_unique_violation(&db) => {
            CoreError::Conflict("an account already exists for this identity".to_string())
        }
        other => other,
    })?;

    info!(account_id = %account.id, role = %account.role, "Account registered");

    if let Some(code) = input.invite_code {
        match Account::find_by_invite_code(&code, pool).await? {
            Some(inviter) => {
                // Reward failures are logged inside record_referral and do
                // not undo the signup itself.
                match referrals::actions::record_referral(
                    inviter.id,
                    account.id,
                    referrals::REFERRAL_REWARD_POINTS,
                    pool,
                )
                .await
                {
                    Ok(_) => {
                        // Pick up the loyalty credit the referral just applied
                        if let Some(updated) = Account::find_by_id(account.id, pool).await? {
                            account = updated;
                        }
                    }
                    Err(e) => {
                        warn!(
                            account_id = %account.id,
                            error = %e,
                            "Signup succeeded but referral crediting failed"
                        );
                    }
                }
            }
            None => {
                warn!(account_id = %account.id, code = %code, "Unknown invite code, no referral recorded");
            }
        }
    }

    Ok(account)
}
