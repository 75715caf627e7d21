// Auth domain - verification of identity-provider tokens.

pub mod jwt;

pub use jwt::{Claims, JwtService};
