use thiserror::Error;

/// Authorization errors for the Encore marketplace.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Permission denied: {0}")]
    NotOwner(&'static str),

    #[error("Invalid or expired token")]
    InvalidToken,
}
