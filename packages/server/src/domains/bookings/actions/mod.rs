//! Booking lifecycle actions.
//!
//! All booking writes go through here: create (with credit reservation),
//! role-driven status transitions, and the admin settlement path to
//! `completed`. Every action authorizes and validates before its first
//! write, so rejected requests leave no side effects.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};

use crate::common::{AccountId, Actor, BookingId, CoreError};
use crate::domains::accounts::models::Account;
use crate::domains::bookings::machines::{self, LedgerEffect};
use crate::domains::bookings::models::{Booking, BookingStatus, CreateBooking};
use crate::domains::credits::models::CreditLedger;
use crate::domains::providers::models::AvailabilityWindow;

/// Request payload for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub venue_id: AccountId,
    pub provider_id: AccountId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub credits_requested: i32,
}

/// Create a booking, reserving the venue's credits.
///
/// `gate_on_availability` is true for the calendar-browsing entry point,
/// which only books slots a published window covers; the direct entry
/// point passes false and books any future slot. Both share this action.
///
/// Reserve-then-insert is not one database transaction: a crash between
/// the two leaves a reservation without a booking. That failure mode is
/// logged and accepted, not compensated.
pub async fn create_booking(
    actor: &Actor,
    request: CreateBookingRequest,
    gate_on_availability: bool,
    pool: &PgPool,
) -> Result<Booking, CoreError> {
    actor.require_venue(request.venue_id)?;

    let now = Utc::now();
    if request.start_time <= now {
        return Err(CoreError::Validation(
            "booking must start in the future".to_string(),
        ));
    }
    if request.end_time <= request.start_time {
        return Err(CoreError::Validation(
            "booking end must be after its start".to_string(),
        ));
    }
    if request.credits_requested <= 0 {
        return Err(CoreError::Validation(
            "requested credits must be positive".to_string(),
        ));
    }

    if Account::find_venue(request.venue_id, pool).await?.is_none() {
        return Err(CoreError::NotFound("venue"));
    }
    if Account::find_provider(request.provider_id, pool)
        .await?
        .is_none()
    {
        return Err(CoreError::NotFound("provider"));
    }

    if gate_on_availability {
        let covered = AvailabilityWindow::covering(
            request.provider_id,
            request.start_time,
            request.end_time,
            pool,
        )
        .await?;
        if !covered {
            return Err(CoreError::Conflict(
                "provider has no published availability covering the requested slot".to_string(),
            ));
        }
    }

    // Last check before the first write; InsufficientCredits propagates as-is.
    CreditLedger::reserve(request.venue_id, request.credits_requested, pool).await?;

    let booking = Booking::insert(
        CreateBooking {
            venue_id: request.venue_id,
            provider_id: request.provider_id,
            start_time: request.start_time,
            end_time: request.end_time,
            credits_reserved: request.credits_requested,
        },
        pool,
    )
    .await
    .map_err(|e| {
        error!(
            venue_id = %request.venue_id,
            credits = request.credits_requested,
            error = %e,
            "Credits reserved but booking insert failed; reservation is orphaned"
        );
        e
    })?;

    info!(
        booking_id = %booking.id,
        venue_id = %booking.venue_id,
        provider_id = %booking.provider_id,
        credits = booking.credits_reserved,
        "Booking created"
    );

    Ok(booking)
}

/// Drive a booking to `target` on behalf of `actor`.
///
/// Ownership is authorized first (403 before 400), then the transition
/// table consulted, then the status swapped with a compare-and-swap so a
/// repeated or racing transition fails without a second ledger release.
pub async fn transition_booking(
    actor: &Actor,
    booking_id: BookingId,
    target: BookingStatus,
    pool: &PgPool,
) -> Result<Booking, CoreError> {
    let booking = Booking::find_by_id(booking_id, pool)
        .await?
        .ok_or(CoreError::NotFound("booking"))?;

    authorize_party(actor, &booking)?;

    let from = booking.status()?;
    let rule = machines::plan(from, target).ok_or_else(|| CoreError::InvalidTransition {
        from: from.to_string(),
        to: target.to_string(),
    })?;

    if !machines::role_allowed(&rule, actor.role) {
        return Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: target.to_string(),
        });
    }

    let updated = Booking::transition_status(booking_id, from, target, pool)
        .await?
        .ok_or_else(|| CoreError::InvalidTransition {
            from: from.to_string(),
            to: target.to_string(),
        })?;

    if rule.effect == LedgerEffect::ReleaseReserved {
        // The CAS above succeeded exactly once for this edge, so this runs
        // at most once per booking. A storage failure here leaves the
        // reservation held; logged, not retried.
        if let Err(e) =
            CreditLedger::release(updated.venue_id, updated.credits_reserved, pool).await
        {
            error!(
                booking_id = %updated.id,
                venue_id = %updated.venue_id,
                credits = updated.credits_reserved,
                error = %e,
                "Booking transitioned but credit release failed"
            );
            return Err(e);
        }
    }

    info!(
        booking_id = %updated.id,
        from = %from,
        to = %target,
        actor_role = %actor.role,
        "Booking transitioned"
    );

    Ok(updated)
}

/// Admin settlement: mark a confirmed booking as completed.
///
/// Deliberately outside the role transition table; completion is driven by
/// the back-office process once the engagement has occurred, and its only
/// effect on this subsystem is opening the feedback gate.
pub async fn complete_booking(
    actor: &Actor,
    booking_id: BookingId,
    pool: &PgPool,
) -> Result<Booking, CoreError> {
    actor.require_admin()?;

    let booking = Booking::find_by_id(booking_id, pool)
        .await?
        .ok_or(CoreError::NotFound("booking"))?;

    let from = booking.status()?;
    if from != BookingStatus::Confirmed {
        return Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: BookingStatus::Completed.to_string(),
        });
    }

    let updated = Booking::transition_status(booking_id, from, BookingStatus::Completed, pool)
        .await?
        .ok_or_else(|| CoreError::InvalidTransition {
            from: from.to_string(),
            to: BookingStatus::Completed.to_string(),
        })?;

    info!(booking_id = %updated.id, "Booking completed");

    Ok(updated)
}

/// The actor must be a party to the booking (or an admin).
fn authorize_party(actor: &Actor, booking: &Booking) -> Result<(), CoreError> {
    use crate::common::Role;

    match actor.role {
        Role::Admin => Ok(()),
        Role::Venue => actor.require_venue(booking.venue_id).map_err(Into::into),
        Role::Provider => actor
            .require_provider(booking.provider_id)
            .map_err(Into::into),
    }
}
