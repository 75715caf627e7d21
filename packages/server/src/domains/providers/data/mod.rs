use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::providers::models::AvailabilityWindow;

/// Availability window data type (GraphQL)
#[derive(Debug, Clone, GraphQLObject)]
pub struct AvailabilityWindowData {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<AvailabilityWindow> for AvailabilityWindowData {
    fn from(window: AvailabilityWindow) -> Self {
        Self {
            id: window.id.into_uuid(),
            provider_id: window.provider_id.into_uuid(),
            date_from: window.date_from,
            date_to: window.date_to,
            created_at: window.created_at,
        }
    }
}

/// Input for publishing an availability window
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct PublishAvailabilityInput {
    pub provider_id: Uuid,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
}
