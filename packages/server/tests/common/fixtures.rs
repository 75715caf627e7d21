//! Shared test fixtures.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use server_core::common::{AccountId, Actor, Role};
use server_core::domains::bookings::actions::{create_booking, CreateBookingRequest};
use server_core::domains::bookings::models::Booking;
use server_core::domains::credits::models::CreditLedger;

/// Insert an account row directly.
pub async fn create_account(pool: &PgPool, role: &str, name: &str) -> AccountId {
    let id = Uuid::new_v4();
    let code = format!("TEST{}", &id.simple().to_string()[..10].to_uppercase());
    sqlx::query(
        "INSERT INTO accounts (id, identity_id, role, display_name, invite_code, loyalty_points)
         VALUES ($1, $2, $3, $4, $5, 0)",
    )
    .bind(id)
    .bind(format!("idp|{}", id))
    .bind(role)
    .bind(name)
    .bind(code)
    .execute(pool)
    .await
    .expect("Failed to create test account");

    AccountId::from_uuid(id)
}

pub async fn create_venue(pool: &PgPool) -> AccountId {
    create_account(pool, "venue", "Test Venue").await
}

pub async fn create_provider(pool: &PgPool) -> AccountId {
    create_account(pool, "provider", "Test Provider").await
}

/// Give a venue purchased credits without touching the transaction log.
pub async fn fund_venue(pool: &PgPool, venue_id: AccountId, credits: i32) {
    CreditLedger::purchase(venue_id, credits, pool)
        .await
        .expect("Failed to fund test venue");
}

/// The venue's actor identity.
pub fn venue_actor(venue_id: AccountId) -> Actor {
    Actor::new(venue_id, Role::Venue)
}

/// The provider's actor identity.
pub fn provider_actor(provider_id: AccountId) -> Actor {
    Actor::new(provider_id, Role::Provider)
}

/// An admin operator.
pub fn admin_actor() -> Actor {
    Actor::new(AccountId::new(), Role::Admin)
}

/// A valid booking request for next week, one hour long.
pub fn booking_request(
    venue_id: AccountId,
    provider_id: AccountId,
    credits: i32,
) -> CreateBookingRequest {
    let start = Utc::now() + Duration::days(7);
    CreateBookingRequest {
        venue_id,
        provider_id,
        start_time: start,
        end_time: start + Duration::hours(1),
        credits_requested: credits,
    }
}

/// Create a pending booking through the real action path.
pub async fn create_pending_booking(
    pool: &PgPool,
    venue_id: AccountId,
    provider_id: AccountId,
    credits: i32,
) -> Booking {
    create_booking(
        &venue_actor(venue_id),
        booking_request(venue_id, provider_id, credits),
        false,
        pool,
    )
    .await
    .expect("Failed to create test booking")
}
