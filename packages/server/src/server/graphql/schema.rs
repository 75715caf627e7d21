//! GraphQL schema definition.

use juniper::{graphql_value, EmptySubscription, FieldError, FieldResult, RootNode};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use super::context::GraphQLContext;

// Common types
use crate::common::{AccountId, BookingId, CoreError, Role};

// Domain actions
use crate::domains::accounts::actions as account_actions;
use crate::domains::bookings::actions as booking_actions;
use crate::domains::credits::actions as credit_actions;
use crate::domains::providers::actions as provider_actions;
use crate::domains::ratings::actions as rating_actions;

// Domain data types (GraphQL types)
use crate::domains::accounts::data::{AccountData, RegisterAccountInput};
use crate::domains::bookings::data::{BookingData, CreateBookingInput};
use crate::domains::credits::data::{
    CreditBalanceData, PurchaseCreditsInput, PurchaseResultData, TransactionData,
};
use crate::domains::providers::data::{AvailabilityWindowData, PublishAvailabilityInput};
use crate::domains::ratings::data::{CreateRatingInput, RatingData};

// Domain models (for queries)
use crate::domains::accounts::models::Account;
use crate::domains::bookings::models::{Booking, BookingStatus};

/// Map a core error onto a GraphQL field error with a stable `code`
/// extension. Internal arms are logged with detail and surfaced opaque.
fn to_field_error(e: CoreError) -> FieldError {
    if e.is_internal() {
        error!(error = %e, "Internal error");
        return FieldError::new("Internal error", graphql_value!({ "code": "INTERNAL" }));
    }
    let code = e.code();
    FieldError::new(e.to_string(), graphql_value!({ "code": code }))
}

fn parse_amount(amount: f64) -> Result<Decimal, CoreError> {
    Decimal::try_from(amount)
        .map(|d| d.round_dp(2))
        .map_err(|_| CoreError::Validation("amount is not a valid money value".to_string()))
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Account Queries
    // =========================================================================

    /// Get a single account by ID
    async fn account(ctx: &GraphQLContext, id: Uuid) -> FieldResult<Option<AccountData>> {
        let account = Account::find_by_id(AccountId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(account.map(AccountData::from))
    }

    // =========================================================================
    // Booking Queries
    // =========================================================================

    /// Get a single booking by ID
    async fn booking(ctx: &GraphQLContext, id: Uuid) -> FieldResult<Option<BookingData>> {
        let booking = Booking::find_by_id(BookingId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(booking.map(BookingData::from))
    }

    /// Bookings requested by a venue (owner or admin)
    async fn bookings_for_venue(
        ctx: &GraphQLContext,
        venue_id: Uuid,
    ) -> FieldResult<Vec<BookingData>> {
        let venue_id = AccountId::from_uuid(venue_id);
        let actor = ctx.actor().map_err(to_field_error)?;
        actor
            .require_venue(venue_id)
            .map_err(|e| to_field_error(e.into()))?;

        let bookings = Booking::for_venue(venue_id, &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(bookings.into_iter().map(BookingData::from).collect())
    }

    /// Bookings addressed to a provider (owner or admin)
    async fn bookings_for_provider(
        ctx: &GraphQLContext,
        provider_id: Uuid,
    ) -> FieldResult<Vec<BookingData>> {
        let provider_id = AccountId::from_uuid(provider_id);
        let actor = ctx.actor().map_err(to_field_error)?;
        actor
            .require_provider(provider_id)
            .map_err(|e| to_field_error(e.into()))?;

        let bookings = Booking::for_provider(provider_id, &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(bookings.into_iter().map(BookingData::from).collect())
    }

    // =========================================================================
    // Credit Queries
    // =========================================================================

    /// A venue's current balance; absent ledgers read as all-zero
    async fn credit_balance(
        ctx: &GraphQLContext,
        venue_id: Uuid,
    ) -> FieldResult<CreditBalanceData> {
        let balance = credit_actions::get_balance(AccountId::from_uuid(venue_id), &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(CreditBalanceData::from(balance))
    }

    /// A venue's transaction history (owner or admin)
    async fn transactions_for_venue(
        ctx: &GraphQLContext,
        venue_id: Uuid,
    ) -> FieldResult<Vec<TransactionData>> {
        let actor = ctx.actor().map_err(to_field_error)?;
        let transactions = credit_actions::transactions_for_venue(
            &actor,
            AccountId::from_uuid(venue_id),
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(transactions.into_iter().map(TransactionData::from).collect())
    }

    // =========================================================================
    // Provider Queries
    // =========================================================================

    /// A provider's published availability windows
    async fn availability_windows(
        ctx: &GraphQLContext,
        provider_id: Uuid,
    ) -> FieldResult<Vec<AvailabilityWindowData>> {
        let windows = provider_actions::windows_for_provider(
            AccountId::from_uuid(provider_id),
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(windows.into_iter().map(AvailabilityWindowData::from).collect())
    }

    // =========================================================================
    // Rating Queries
    // =========================================================================

    /// Ratings received by a provider. Scores kept private by the venue
    /// are masked when the caller is that provider.
    async fn ratings_for_provider(
        ctx: &GraphQLContext,
        provider_id: Uuid,
    ) -> FieldResult<Vec<RatingData>> {
        let viewer = ctx.viewer();
        let ratings = rating_actions::ratings_for_provider(
            viewer.as_ref(),
            AccountId::from_uuid(provider_id),
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(ratings.into_iter().map(RatingData::from).collect())
    }

    /// A provider's feedback badge (Good / Excellent / Top-tier), or null
    async fn provider_badge(
        ctx: &GraphQLContext,
        provider_id: Uuid,
    ) -> FieldResult<Option<String>> {
        rating_actions::provider_badge(AccountId::from_uuid(provider_id), &ctx.db_pool)
            .await
            .map_err(to_field_error)
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Account Mutations
    // =========================================================================

    /// Register a venue or provider account (signup)
    async fn register_account(
        ctx: &GraphQLContext,
        input: RegisterAccountInput,
    ) -> FieldResult<AccountData> {
        info!("register_account mutation called: {}", input.display_name);

        let role = Role::from_str(&input.role)
            .map_err(|_| to_field_error(CoreError::Validation(format!(
                "role must be venue or provider, got {}",
                input.role
            ))))?;

        let account = account_actions::register_account(
            account_actions::RegisterAccount {
                identity_id: input.identity_id,
                role,
                display_name: input.display_name,
                invite_code: input.invite_code,
            },
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(AccountData::from(account))
    }

    // =========================================================================
    // Provider Mutations
    // =========================================================================

    /// Publish an open availability window (provider)
    async fn publish_availability(
        ctx: &GraphQLContext,
        input: PublishAvailabilityInput,
    ) -> FieldResult<AvailabilityWindowData> {
        let actor = ctx.actor().map_err(to_field_error)?;

        let window = provider_actions::publish_availability(
            &actor,
            AccountId::from_uuid(input.provider_id),
            input.date_from,
            input.date_to,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(AvailabilityWindowData::from(window))
    }

    // =========================================================================
    // Booking Mutations
    // =========================================================================

    /// Create a booking directly (venue). Reserves the requested credits.
    async fn create_booking(
        ctx: &GraphQLContext,
        input: CreateBookingInput,
    ) -> FieldResult<BookingData> {
        info!("create_booking mutation called: provider {}", input.provider_id);

        let actor = ctx.actor().map_err(to_field_error)?;
        let booking = booking_actions::create_booking(
            &actor,
            booking_request(&input),
            false,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(BookingData::from(booking))
    }

    /// Create a booking from a provider's published calendar (venue).
    /// Fails unless an availability window covers the requested slot.
    async fn create_calendar_booking(
        ctx: &GraphQLContext,
        input: CreateBookingInput,
    ) -> FieldResult<BookingData> {
        info!(
            "create_calendar_booking mutation called: provider {}",
            input.provider_id
        );

        let actor = ctx.actor().map_err(to_field_error)?;
        let booking = booking_actions::create_booking(
            &actor,
            booking_request(&input),
            true,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(BookingData::from(booking))
    }

    /// Move a booking to a new status (confirm, reject, cancel)
    async fn transition_booking(
        ctx: &GraphQLContext,
        booking_id: Uuid,
        target_status: String,
    ) -> FieldResult<BookingData> {
        info!(
            "transition_booking mutation called: {} -> {}",
            booking_id, target_status
        );

        let actor = ctx.actor().map_err(to_field_error)?;
        let target = BookingStatus::from_str(&target_status)
            .map_err(|_| to_field_error(CoreError::Validation(format!(
                "unknown booking status {}",
                target_status
            ))))?;

        let booking = booking_actions::transition_booking(
            &actor,
            BookingId::from_uuid(booking_id),
            target,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(BookingData::from(booking))
    }

    /// Settle a confirmed booking as completed (admin only)
    async fn complete_booking(ctx: &GraphQLContext, booking_id: Uuid) -> FieldResult<BookingData> {
        info!("complete_booking mutation called: {}", booking_id);

        let actor = ctx.actor().map_err(to_field_error)?;
        let booking = booking_actions::complete_booking(
            &actor,
            BookingId::from_uuid(booking_id),
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(BookingData::from(booking))
    }

    // =========================================================================
    // Credit Mutations
    // =========================================================================

    /// Purchase a credit package for a venue
    async fn purchase_credits(
        ctx: &GraphQLContext,
        input: PurchaseCreditsInput,
    ) -> FieldResult<PurchaseResultData> {
        info!(
            "purchase_credits mutation called: venue {} +{}",
            input.venue_id, input.credits
        );

        let actor = ctx.actor().map_err(to_field_error)?;
        let amount = parse_amount(input.amount).map_err(to_field_error)?;

        let purchase = credit_actions::purchase_credits(
            &actor,
            AccountId::from_uuid(input.venue_id),
            input.credits,
            amount,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(PurchaseResultData {
            balance: purchase.balance.into(),
            transaction: purchase.transaction.into(),
        })
    }

    /// Record a provider's membership payment (admin only)
    async fn record_membership_payment(
        ctx: &GraphQLContext,
        provider_id: Uuid,
        amount: f64,
    ) -> FieldResult<TransactionData> {
        let actor = ctx.actor().map_err(to_field_error)?;
        let amount = parse_amount(amount).map_err(to_field_error)?;

        let transaction = credit_actions::record_membership_payment(
            &actor,
            AccountId::from_uuid(provider_id),
            amount,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(TransactionData::from(transaction))
    }

    // =========================================================================
    // Rating Mutations
    // =========================================================================

    /// Leave feedback on a completed booking (owning venue only)
    async fn create_rating(
        ctx: &GraphQLContext,
        input: CreateRatingInput,
    ) -> FieldResult<RatingData> {
        info!("create_rating mutation called: booking {}", input.booking_id);

        let actor = ctx.actor().map_err(to_field_error)?;
        let rating = rating_actions::create_rating(
            &actor,
            rating_actions::CreateRatingRequest {
                booking_id: BookingId::from_uuid(input.booking_id),
                stars: input.stars,
                text: input.text,
                visible_to_provider: input.visible_to_provider,
            },
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(RatingData::from(rating_actions::MaskedRating {
            stars: Some(rating.stars),
            rating,
        }))
    }
}

fn booking_request(input: &CreateBookingInput) -> booking_actions::CreateBookingRequest {
    booking_actions::CreateBookingRequest {
        venue_id: AccountId::from_uuid(input.venue_id),
        provider_id: AccountId::from_uuid(input.provider_id),
        start_time: input.start_time,
        end_time: input.end_time,
        credits_requested: input.credits_requested,
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
