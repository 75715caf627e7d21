use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::ratings::actions::MaskedRating;

/// Rating data type (GraphQL)
///
/// `stars` is optional: it is masked for providers when the venue kept the
/// score private.
#[derive(Debug, Clone, GraphQLObject)]
pub struct RatingData {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub venue_id: Uuid,
    pub provider_id: Uuid,
    pub stars: Option<i32>,
    pub text: String,
    pub visible_to_provider: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MaskedRating> for RatingData {
    fn from(masked: MaskedRating) -> Self {
        let r = masked.rating;
        Self {
            id: r.id.into_uuid(),
            booking_id: r.booking_id.into_uuid(),
            venue_id: r.venue_id.into_uuid(),
            provider_id: r.provider_id.into_uuid(),
            stars: masked.stars,
            text: r.text,
            visible_to_provider: r.visible_to_provider,
            created_at: r.created_at,
        }
    }
}

/// Input for creating a rating
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateRatingInput {
    pub booking_id: Uuid,
    pub stars: i32,
    pub text: String,
    pub visible_to_provider: bool,
}
