//! Provider calendar actions.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::common::{AccountId, Actor, CoreError};
use crate::domains::accounts::models::Account;
use crate::domains::providers::models::AvailabilityWindow;

/// Publish an open calendar window for a provider.
pub async fn publish_availability(
    actor: &Actor,
    provider_id: AccountId,
    date_from: DateTime<Utc>,
    date_to: DateTime<Utc>,
    pool: &PgPool,
) -> Result<AvailabilityWindow, CoreError> {
    actor.require_provider(provider_id)?;

    if date_to <= date_from {
        return Err(CoreError::Validation(
            "window end must be after window start".to_string(),
        ));
    }
    if Account::find_provider(provider_id, pool).await?.is_none() {
        return Err(CoreError::NotFound("provider"));
    }

    let window = AvailabilityWindow::publish(provider_id, date_from, date_to, pool).await?;
    info!(provider_id = %provider_id, window_id = %window.id, "Availability published");

    Ok(window)
}

/// List a provider's published windows (public read).
pub async fn windows_for_provider(
    provider_id: AccountId,
    pool: &PgPool,
) -> Result<Vec<AvailabilityWindow>, CoreError> {
    AvailabilityWindow::for_provider(provider_id, pool).await
}
