use super::{AuthError, Role};
use crate::common::entity_ids::AccountId;

/// The authenticated caller of an operation.
///
/// Every mutating operation authorizes through one of the predicates below
/// before touching ledger or booking state, so rejected requests cause zero
/// side effects. Admin operators pass the ownership predicates for any
/// account; they do not pass the role-specific ones unless stated.
///
/// Usage:
/// ```ignore
/// ctx.actor()?.require_venue(input.venue_id)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub account_id: AccountId,
    pub role: Role,
}

impl Actor {
    /// Create an actor from the identity provider's `(account_id, role)` pair.
    pub fn new(account_id: AccountId, role: Role) -> Self {
        Self { account_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require an admin operator.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::AdminRequired)
        }
    }

    /// Require the caller to be the named venue, or an admin acting for it.
    pub fn require_venue(&self, venue_id: AccountId) -> Result<(), AuthError> {
        if self.is_admin() || (self.role == Role::Venue && self.account_id == venue_id) {
            Ok(())
        } else {
            Err(AuthError::NotOwner("caller does not own this venue"))
        }
    }

    /// Require the caller to be the named provider, or an admin acting for it.
    pub fn require_provider(&self, provider_id: AccountId) -> Result<(), AuthError> {
        if self.is_admin() || (self.role == Role::Provider && self.account_id == provider_id) {
            Ok(())
        } else {
            Err(AuthError::NotOwner("caller does not own this provider"))
        }
    }

    /// True when the caller is exactly the named venue (no admin bypass).
    /// The rating gate admits venue feedback from the owning venue only.
    pub fn is_owning_venue(&self, venue_id: AccountId) -> bool {
        self.role == Role::Venue && self.account_id == venue_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_owns_itself() {
        let id = AccountId::new();
        let actor = Actor::new(id, Role::Venue);
        assert!(actor.require_venue(id).is_ok());
        assert!(actor.require_provider(id).is_err());
    }

    #[test]
    fn test_venue_cannot_act_for_other_venue() {
        let actor = Actor::new(AccountId::new(), Role::Venue);
        assert!(actor.require_venue(AccountId::new()).is_err());
    }

    #[test]
    fn test_admin_passes_ownership_checks() {
        let actor = Actor::new(AccountId::new(), Role::Admin);
        assert!(actor.require_venue(AccountId::new()).is_ok());
        assert!(actor.require_provider(AccountId::new()).is_ok());
        assert!(actor.require_admin().is_ok());
    }

    #[test]
    fn test_admin_is_not_an_owning_venue() {
        let venue_id = AccountId::new();
        let admin = Actor::new(AccountId::new(), Role::Admin);
        assert!(!admin.is_owning_venue(venue_id));

        let venue = Actor::new(venue_id, Role::Venue);
        assert!(venue.is_owning_venue(venue_id));
    }

    #[test]
    fn test_non_admin_fails_admin_check() {
        let actor = Actor::new(AccountId::new(), Role::Provider);
        assert!(actor.require_admin().is_err());
    }
}
