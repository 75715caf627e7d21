//! GraphQL surface tests: the booking lifecycle end to end through the
//! schema, plus authentication and error-code behavior.

mod common;

use crate::common::{
    admin_actor, create_provider, create_venue, fund_venue, TestHarness,
};
use chrono::{Duration, Utc};
use server_core::common::{AccountId, Role};

fn iso(dt: chrono::DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[tokio::test]
async fn booking_lifecycle_through_the_api() {
    let harness = TestHarness::new().await.unwrap();
    let venue_id = create_venue(&harness.db_pool).await;
    let provider_id = create_provider(&harness.db_pool).await;
    fund_venue(&harness.db_pool, venue_id, 10).await;

    let venue = harness.graphql_as(venue_id, Role::Venue);
    let provider = harness.graphql_as(provider_id, Role::Provider);

    let start = Utc::now() + Duration::days(3);
    let end = start + Duration::hours(2);

    // Venue books the provider for 4 credits
    let result = venue
        .execute(&format!(
            r#"mutation {{
                createBooking(input: {{
                    venueId: "{venue_id}",
                    providerId: "{provider_id}",
                    startTime: "{}",
                    endTime: "{}",
                    creditsRequested: 4
                }}) {{ id status creditsReserved }}
            }}"#,
            iso(start),
            iso(end),
        ))
        .await;
    assert!(result.is_ok(), "createBooking failed: {:?}", result.errors);
    assert_eq!(result.get("createBooking.status"), "pending");
    let booking_id = result.get("createBooking.id");
    let booking_id = booking_id.as_str().unwrap();

    // The reservation shows in the balance
    let result = venue
        .execute(&format!(
            r#"query {{ creditBalance(venueId: "{venue_id}") {{ total used available }} }}"#
        ))
        .await;
    assert_eq!(result.get("creditBalance.used"), 4);
    assert_eq!(result.get("creditBalance.available"), 6);

    // Provider rejects; credits return
    let result = provider
        .execute(&format!(
            r#"mutation {{
                transitionBooking(bookingId: "{booking_id}", targetStatus: "rejected") {{ status }}
            }}"#
        ))
        .await;
    assert!(result.is_ok(), "transition failed: {:?}", result.errors);
    assert_eq!(result.get("transitionBooking.status"), "rejected");

    let result = venue
        .execute(&format!(
            r#"query {{ creditBalance(venueId: "{venue_id}") {{ used available }} }}"#
        ))
        .await;
    assert_eq!(result.get("creditBalance.used"), 0);
    assert_eq!(result.get("creditBalance.available"), 10);
}

#[tokio::test]
async fn purchase_records_the_scenario_transaction() {
    let harness = TestHarness::new().await.unwrap();
    let venue_id = create_venue(&harness.db_pool).await;
    let venue = harness.graphql_as(venue_id, Role::Venue);

    let result = venue
        .execute(&format!(
            r#"mutation {{
                purchaseCredits(input: {{ venueId: "{venue_id}", credits: 15, amount: 129.99 }}) {{
                    balance {{ total available }}
                    transaction {{ txType amount }}
                }}
            }}"#
        ))
        .await;
    assert!(result.is_ok(), "purchase failed: {:?}", result.errors);
    assert_eq!(result.get("purchaseCredits.balance.total"), 15);
    assert_eq!(
        result.get("purchaseCredits.transaction.txType"),
        "credit_purchase"
    );
    assert_eq!(result.get("purchaseCredits.transaction.amount"), "129.99");
}

#[tokio::test]
async fn mutations_require_authentication() {
    let harness = TestHarness::new().await.unwrap();
    let venue_id = create_venue(&harness.db_pool).await;
    let anonymous = harness.graphql();

    let result = anonymous
        .execute(&format!(
            r#"mutation {{
                purchaseCredits(input: {{ venueId: "{venue_id}", credits: 5, amount: 10.0 }}) {{
                    balance {{ total }}
                }}
            }}"#
        ))
        .await;
    assert!(!result.is_ok());
    assert!(result.errors[0].contains("Authentication required"));
}

#[tokio::test]
async fn venues_cannot_purchase_for_each_other() {
    let harness = TestHarness::new().await.unwrap();
    let venue_id = create_venue(&harness.db_pool).await;
    let other_venue = create_venue(&harness.db_pool).await;

    let intruder = harness.graphql_as(other_venue, Role::Venue);
    let result = intruder
        .execute(&format!(
            r#"mutation {{
                purchaseCredits(input: {{ venueId: "{venue_id}", credits: 5, amount: 10.0 }}) {{
                    balance {{ total }}
                }}
            }}"#
        ))
        .await;
    assert!(!result.is_ok());
    assert!(result.errors[0].contains("Permission denied"));
}

#[tokio::test]
async fn insufficient_credits_surface_as_conflict() {
    let harness = TestHarness::new().await.unwrap();
    let venue_id = create_venue(&harness.db_pool).await;
    let provider_id = create_provider(&harness.db_pool).await;
    fund_venue(&harness.db_pool, venue_id, 2).await;

    let venue = harness.graphql_as(venue_id, Role::Venue);
    let start = Utc::now() + Duration::days(1);

    let result = venue
        .execute(&format!(
            r#"mutation {{
                createBooking(input: {{
                    venueId: "{venue_id}",
                    providerId: "{provider_id}",
                    startTime: "{}",
                    endTime: "{}",
                    creditsRequested: 5
                }}) {{ id }}
            }}"#,
            iso(start),
            iso(start + Duration::hours(1)),
        ))
        .await;
    assert!(!result.is_ok());
    assert!(result.errors[0].contains("Insufficient credits"));
}

#[tokio::test]
async fn full_feedback_flow_through_the_api() {
    let harness = TestHarness::new().await.unwrap();
    let venue_id = create_venue(&harness.db_pool).await;
    let provider_id = create_provider(&harness.db_pool).await;
    fund_venue(&harness.db_pool, venue_id, 10).await;

    let venue = harness.graphql_as(venue_id, Role::Venue);
    let provider = harness.graphql_as(provider_id, Role::Provider);
    let admin = harness.graphql_as(admin_actor().account_id, Role::Admin);

    let start = Utc::now() + Duration::days(2);
    let result = venue
        .execute(&format!(
            r#"mutation {{
                createBooking(input: {{
                    venueId: "{venue_id}",
                    providerId: "{provider_id}",
                    startTime: "{}",
                    endTime: "{}",
                    creditsRequested: 3
                }}) {{ id }}
            }}"#,
            iso(start),
            iso(start + Duration::hours(1)),
        ))
        .await;
    let booking_id = result.unwrap()["createBooking"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    provider
        .execute(&format!(
            r#"mutation {{ transitionBooking(bookingId: "{booking_id}", targetStatus: "confirmed") {{ status }} }}"#
        ))
        .await
        .unwrap();

    admin
        .execute(&format!(
            r#"mutation {{ completeBooking(bookingId: "{booking_id}") {{ status }} }}"#
        ))
        .await
        .unwrap();

    // Feedback with a score the venue keeps private
    let result = venue
        .execute(&format!(
            r#"mutation {{
                createRating(input: {{
                    bookingId: "{booking_id}",
                    stars: 5,
                    text: "Packed the lobby bar",
                    visibleToProvider: false
                }}) {{ id stars }}
            }}"#
        ))
        .await;
    assert!(result.is_ok(), "createRating failed: {:?}", result.errors);
    assert_eq!(result.get("createRating.stars"), 5);

    // A second rating conflicts
    let result = venue
        .execute(&format!(
            r#"mutation {{
                createRating(input: {{
                    bookingId: "{booking_id}",
                    stars: 1,
                    text: "changed my mind",
                    visibleToProvider: true
                }}) {{ id }}
            }}"#
        ))
        .await;
    assert!(!result.is_ok());
    assert!(result.errors[0].contains("already been rated"));

    // The provider's own view hides the private score
    let result = provider
        .execute(&format!(
            r#"query {{ ratingsForProvider(providerId: "{provider_id}") {{ stars text }} }}"#
        ))
        .await;
    let ratings = result.unwrap()["ratingsForProvider"].clone();
    assert_eq!(ratings[0]["stars"], serde_json::Value::Null);
    assert_eq!(ratings[0]["text"], "Packed the lobby bar");
}

#[tokio::test]
async fn registration_and_referral_through_the_api() {
    let harness = TestHarness::new().await.unwrap();
    let anonymous = harness.graphql();

    let result = anonymous
        .execute(&format!(
            r#"mutation {{
                registerAccount(input: {{
                    identityId: "idp|{}",
                    role: "provider",
                    displayName: "Night Owls"
                }}) {{ id inviteCode loyaltyPoints }}
            }}"#,
            uuid::Uuid::new_v4(),
        ))
        .await;
    assert!(result.is_ok(), "register failed: {:?}", result.errors);
    let invite_code = result.get("registerAccount.inviteCode");
    let invite_code = invite_code.as_str().unwrap();
    let inviter_id = result.get("registerAccount.id");

    let result = anonymous
        .execute(&format!(
            r#"mutation {{
                registerAccount(input: {{
                    identityId: "idp|{}",
                    role: "venue",
                    displayName: "Seaside Stage",
                    inviteCode: "{invite_code}"
                }}) {{ id loyaltyPoints }}
            }}"#,
            uuid::Uuid::new_v4(),
        ))
        .await;
    assert!(result.is_ok());
    assert_eq!(result.get("registerAccount.loyaltyPoints"), 50);

    // Inviter got their points too
    let result = anonymous
        .execute(&format!(
            r#"query {{ account(id: "{}") {{ loyaltyPoints }} }}"#,
            inviter_id.as_str().unwrap(),
        ))
        .await;
    assert_eq!(result.get("account.loyaltyPoints"), 50);
}

#[tokio::test]
async fn admin_membership_payment_through_the_api() {
    let harness = TestHarness::new().await.unwrap();
    let provider_id = create_provider(&harness.db_pool).await;
    let admin = harness.graphql_as(AccountId::new(), Role::Admin);

    let result = admin
        .execute(&format!(
            r#"mutation {{
                recordMembershipPayment(providerId: "{provider_id}", amount: 19.99) {{
                    txType amount providerId
                }}
            }}"#
        ))
        .await;
    assert!(result.is_ok(), "membership failed: {:?}", result.errors);
    assert_eq!(result.get("recordMembershipPayment.txType"), "membership");
    assert_eq!(result.get("recordMembershipPayment.amount"), "19.99");

    // Providers cannot record their own membership payments
    let provider = harness.graphql_as(provider_id, Role::Provider);
    let result = provider
        .execute(&format!(
            r#"mutation {{
                recordMembershipPayment(providerId: "{provider_id}", amount: 19.99) {{ txType }}
            }}"#
        ))
        .await;
    assert!(!result.is_ok());
    assert!(result.errors[0].contains("Admin access required"));
}
