//! Rating gate actions.

use sqlx::PgPool;
use tracing::info;

use crate::common::{AccountId, Actor, AuthError, BookingId, CoreError};
use crate::domains::bookings::models::{Booking, BookingStatus};
use crate::domains::ratings::models::{CreateRating, Rating};

/// Badge tiers derived from mean stars. Providers only ever see the badge,
/// never the raw average.
const TIER_TOP: f64 = 4.5;
const TIER_EXCELLENT: f64 = 4.0;
const TIER_GOOD: f64 = 3.5;

/// Request payload for creating a rating.
#[derive(Debug, Clone)]
pub struct CreateRatingRequest {
    pub booking_id: BookingId,
    pub stars: i32,
    pub text: String,
    pub visible_to_provider: bool,
}

/// Leave feedback on a completed booking.
///
/// Only the venue that owns the booking may rate it (no admin bypass),
/// only once it is completed, and only once. Uniqueness is claimed
/// atomically by the insert itself, so two racing calls resolve to one
/// rating and one conflict.
pub async fn create_rating(
    actor: &Actor,
    request: CreateRatingRequest,
    pool: &PgPool,
) -> Result<Rating, CoreError> {
    let booking = Booking::find_by_id(request.booking_id, pool)
        .await?
        .ok_or(CoreError::NotFound("booking"))?;

    if !actor.is_owning_venue(booking.venue_id) {
        return Err(AuthError::NotOwner("only the booking venue may leave feedback").into());
    }

    let status = booking.status()?;
    if status != BookingStatus::Completed {
        return Err(CoreError::Conflict(format!(
            "booking is {} and not yet eligible for feedback",
            status
        )));
    }

    if !(1..=5).contains(&request.stars) {
        return Err(CoreError::Validation(
            "stars must be between 1 and 5".to_string(),
        ));
    }

    let rating = Rating::insert_unique(
        CreateRating {
            booking_id: booking.id,
            venue_id: booking.venue_id,
            provider_id: booking.provider_id,
            stars: request.stars,
            text: request.text,
            visible_to_provider: request.visible_to_provider,
        },
        pool,
    )
    .await?
    .ok_or_else(|| CoreError::Conflict("booking has already been rated".to_string()))?;

    info!(
        rating_id = %rating.id,
        booking_id = %rating.booking_id,
        stars = rating.stars,
        "Rating created"
    );

    Ok(rating)
}

/// Ratings received by a provider.
///
/// When the viewer is that provider, scores the venue kept private are
/// masked; the feedback text is always returned.
pub async fn ratings_for_provider(
    viewer: Option<&Actor>,
    provider_id: AccountId,
    pool: &PgPool,
) -> Result<Vec<MaskedRating>, CoreError> {
    let ratings = Rating::for_provider(provider_id, pool).await?;

    let viewer_is_provider = viewer
        .map(|a| !a.is_admin() && a.account_id == provider_id)
        .unwrap_or(false);

    Ok(ratings
        .into_iter()
        .map(|r| {
            let stars = if viewer_is_provider && !r.visible_to_provider {
                None
            } else {
                Some(r.stars)
            };
            MaskedRating { stars, rating: r }
        })
        .collect())
}

/// A rating as seen by a particular viewer.
#[derive(Debug, Clone)]
pub struct MaskedRating {
    pub stars: Option<i32>,
    pub rating: Rating,
}

/// The provider's three-tier badge, computed from mean stars on the read
/// side. Below the lowest tier there is no badge at all.
pub async fn provider_badge(
    provider_id: AccountId,
    pool: &PgPool,
) -> Result<Option<String>, CoreError> {
    let mean = Rating::mean_stars_for_provider(provider_id, pool).await?;
    Ok(mean.and_then(badge_for_mean))
}

fn badge_for_mean(mean: f64) -> Option<String> {
    if mean >= TIER_TOP {
        Some("Top-tier".to_string())
    } else if mean >= TIER_EXCELLENT {
        Some("Excellent".to_string())
    } else if mean >= TIER_GOOD {
        Some("Good".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_tiers() {
        assert_eq!(badge_for_mean(4.7), Some("Top-tier".to_string()));
        assert_eq!(badge_for_mean(4.5), Some("Top-tier".to_string()));
        assert_eq!(badge_for_mean(4.2), Some("Excellent".to_string()));
        assert_eq!(badge_for_mean(3.5), Some("Good".to_string()));
        assert_eq!(badge_for_mean(3.4), None);
        assert_eq!(badge_for_mean(1.0), None);
    }
}
