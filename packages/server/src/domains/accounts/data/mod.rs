use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::accounts::models::Account;

/// Account data type (GraphQL)
#[derive(Debug, Clone, GraphQLObject)]
pub struct AccountData {
    pub id: Uuid,
    pub role: String,
    pub display_name: String,
    pub invite_code: String,
    pub loyalty_points: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountData {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.into_uuid(),
            role: account.role,
            display_name: account.display_name,
            invite_code: account.invite_code,
            loyalty_points: account.loyalty_points,
            created_at: account.created_at,
        }
    }
}

/// Input for registering a new account
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct RegisterAccountInput {
    pub identity_id: String,
    /// "venue" or "provider"
    pub role: String,
    pub display_name: String,
    /// Another account's invite code, if this signup was referred
    pub invite_code: Option<String>,
}
