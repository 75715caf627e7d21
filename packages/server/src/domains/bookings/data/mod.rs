use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::bookings::models::Booking;

/// Booking data type (GraphQL)
#[derive(Debug, Clone, GraphQLObject)]
pub struct BookingData {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub credits_reserved: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingData {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.into_uuid(),
            venue_id: booking.venue_id.into_uuid(),
            provider_id: booking.provider_id.into_uuid(),
            start_time: booking.start_time,
            end_time: booking.end_time,
            status: booking.status,
            credits_reserved: booking.credits_reserved,
            created_at: booking.created_at,
        }
    }
}

/// Input for creating a booking
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateBookingInput {
    pub venue_id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub credits_requested: i32,
}
