use serde::{Deserialize, Serialize};

/// Actor roles in the Encore marketplace.
///
/// The identity provider authenticates a request and hands the core an
/// `(account_id, role)` pair. Accounts themselves are only ever `Venue` or
/// `Provider`; `Admin` is an operator identity with no marketplace account
/// of its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Credit-holding buyer (a hotel in the business domain).
    Venue,
    /// Bookable seller (an artist).
    Provider,
    /// Back-office operator.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Venue => write!(f, "venue"),
            Role::Provider => write!(f, "provider"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "venue" => Ok(Role::Venue),
            "provider" => Ok(Role::Provider),
            "admin" => Ok(Role::Admin),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}
