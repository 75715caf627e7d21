//! Typed ID definitions for all domain entities.
//!
//! One marker type per entity, plus a type alias used throughout the
//! application. The compiler prevents mixing them up.

// Re-export the core Id type and version marker
pub use super::id::{Id, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Account entities (venues and providers).
pub struct Account;

/// Marker type for Booking entities.
pub struct Booking;

/// Marker type for CreditTransaction entities (append-only money log).
pub struct CreditTransaction;

/// Marker type for Rating entities (post-completion feedback).
pub struct Rating;

/// Marker type for Referral entities.
pub struct Referral;

/// Marker type for AvailabilityWindow entities (provider calendars).
pub struct AvailabilityWindow;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Account entities. Venue and provider IDs are both
/// account IDs; the account's role distinguishes them.
pub type AccountId = Id<Account>;

/// Typed ID for Booking entities.
pub type BookingId = Id<Booking>;

/// Typed ID for CreditTransaction entities.
pub type TransactionId = Id<CreditTransaction>;

/// Typed ID for Rating entities.
pub type RatingId = Id<Rating>;

/// Typed ID for Referral entities.
pub type ReferralId = Id<Referral>;

/// Typed ID for AvailabilityWindow entities.
pub type WindowId = Id<AvailabilityWindow>;
