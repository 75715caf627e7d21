//! Booking state machine - pure decision logic.
//!
//! The transition table below is the single source of truth for the
//! role-driven status moves: which exist, who may drive them, and what
//! they do to the credit ledger. The actions layer authorizes ownership
//! and executes effects. The only move outside this table is the admin
//! settlement of a confirmed booking to completed.

use crate::common::{CoreError, Role};
use crate::domains::bookings::models::BookingStatus;

/// What a transition does to the venue's credit reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEffect {
    /// The reservation stays in place.
    None,
    /// The booking's reserved credits go back to the available pool.
    ReleaseReserved,
}

/// A permitted transition: the role that may drive it and its ledger effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub actor: Role,
    pub effect: LedgerEffect,
}

/// Look up the rule for a `(from, to)` move. Absent entries are invalid
/// transitions, including everything out of a terminal state.
pub fn plan(from: BookingStatus, to: BookingStatus) -> Option<TransitionRule> {
    use BookingStatus::*;

    match (from, to) {
        (Pending, Confirmed) => Some(TransitionRule {
            actor: Role::Provider,
            effect: LedgerEffect::None,
        }),
        (Pending, Rejected) => Some(TransitionRule {
            actor: Role::Provider,
            effect: LedgerEffect::ReleaseReserved,
        }),
        (Pending, Cancelled) => Some(TransitionRule {
            actor: Role::Venue,
            effect: LedgerEffect::ReleaseReserved,
        }),
        // A confirmed booking forfeits its reservation on cancellation.
        // Open product question whether this is a deliberate penalty;
        // preserved as-is, see DESIGN.md.
        (Confirmed, Cancelled) => Some(TransitionRule {
            actor: Role::Venue,
            effect: LedgerEffect::None,
        }),
        _ => None,
    }
}

/// May `role` drive this rule? Admin operators may drive any permitted
/// transition; venue and provider only their own column of the table.
pub fn role_allowed(rule: &TransitionRule, role: Role) -> bool {
    role == Role::Admin || role == rule.actor
}
