use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;

use crate::common::{AccountId, CoreError, Role};

/// Account model - SQL persistence layer
///
/// One row per marketplace account. Venues and providers share the table;
/// the `role` column distinguishes them. `identity_id` is the external
/// identity provider's subject for the owning login.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub identity_id: String,
    pub role: String,
    pub display_name: String,

    // Referral program
    pub invite_code: String,
    pub loyalty_points: i32,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a new account
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub identity_id: String,
    pub role: Role,
    pub display_name: String,
    pub invite_code: String,
}

impl Account {
    /// The account's role, parsed. Rows only ever hold `venue` or `provider`.
    pub fn role(&self) -> Result<Role, CoreError> {
        Role::from_str(&self.role).map_err(CoreError::Internal)
    }

    /// Insert a new account
    pub async fn insert(input: CreateAccount, pool: &PgPool) -> Result<Self, CoreError> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO accounts (id, identity_id, role, display_name, invite_code, loyalty_points)
             VALUES ($1, $2, $3, $4, $5, 0)
             RETURNING *",
        )
        .bind(AccountId::new())
        .bind(&input.identity_id)
        .bind(input.role.to_string())
        .bind(&input.display_name)
        .bind(&input.invite_code)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find account by ID
    pub async fn find_by_id(id: AccountId, pool: &PgPool) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find a venue account by ID
    pub async fn find_venue(id: AccountId, pool: &PgPool) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1 AND role = 'venue'")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find a provider account by ID
    pub async fn find_provider(id: AccountId, pool: &PgPool) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1 AND role = 'provider'")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Look up an account by its invite code
    pub async fn find_by_invite_code(
        code: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, CoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE invite_code = $1")
            .bind(code)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Add loyalty points to an account (referral rewards)
    pub async fn increment_loyalty(
        id: AccountId,
        points: i32,
        pool: &PgPool,
    ) -> Result<Self, CoreError> {
        sqlx::query_as::<_, Self>(
            "UPDATE accounts SET loyalty_points = loyalty_points + $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(points)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_role_parses() {
        let account = Account {
            id: AccountId::new(),
            identity_id: "auth0|abc123".to_string(),
            role: "venue".to_string(),
            display_name: "Grand Hotel".to_string(),
            invite_code: "GRANDHOTELX7".to_string(),
            loyalty_points: 0,
            created_at: Utc::now(),
        };

        assert_eq!(account.role().unwrap(), Role::Venue);
    }
}
