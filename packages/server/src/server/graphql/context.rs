use sqlx::PgPool;

use crate::common::{Actor, AuthError, CoreError};
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared resources plus the per-request authenticated caller, if any.
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(db_pool: PgPool, auth_user: Option<AuthUser>) -> Self {
        Self { db_pool, auth_user }
    }

    /// The authenticated actor, or an authentication error for anonymous
    /// requests. Mutations call this first.
    pub fn actor(&self) -> Result<Actor, CoreError> {
        self.auth_user
            .as_ref()
            .map(|user| Actor::new(user.account_id, user.role))
            .ok_or_else(|| AuthError::AuthenticationRequired.into())
    }

    /// The actor when present; public queries use this to tailor reads.
    pub fn viewer(&self) -> Option<Actor> {
        self.auth_user
            .as_ref()
            .map(|user| Actor::new(user.account_id, user.role))
    }
}
