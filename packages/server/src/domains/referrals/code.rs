//! Invite code generation.
//!
//! Codes are an uppercase alphanumeric stem derived from the account's
//! display name plus a short random suffix. Uniqueness is probed against
//! the persisted `accounts.invite_code` column; after a bounded number of
//! collisions the suffix falls back to the current timestamp so generation
//! always terminates.

use rand::Rng;
use sqlx::PgPool;

use crate::common::CoreError;
use crate::domains::accounts::models::Account;

const SUFFIX_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const STEM_MAX_LEN: usize = 8;
const MAX_ATTEMPTS: usize = 5;

/// Fallback stem for display names with no usable characters.
const DEFAULT_STEM: &str = "ENCORE";

/// Uppercase alphanumeric stem from a display name.
///
/// "The Grand Hôtel" -> "THEGRAND", "宴" -> "ENCORE".
pub fn code_stem(display_name: &str) -> String {
    let stem: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(STEM_MAX_LEN)
        .collect();

    if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem
    }
}

/// Random 2-3 character suffix.
fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(2..=3);
    (0..len)
        .map(|_| SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())] as char)
        .collect()
}

/// Suffix derived from the current timestamp, used once random attempts
/// are exhausted. Collisions here would need two exhausted generations in
/// the same second for the same stem.
fn timestamp_suffix() -> String {
    format!("{}", chrono::Utc::now().timestamp() % 100_000)
}

/// Generate an invite code that does not collide with any persisted one.
pub async fn generate_unique_code(
    display_name: &str,
    pool: &PgPool,
) -> Result<String, CoreError> {
    let stem = code_stem(display_name);

    for _ in 0..MAX_ATTEMPTS {
        let candidate = format!("{}{}", stem, random_suffix());
        if Account::find_by_invite_code(&candidate, pool).await?.is_none() {
            return Ok(candidate);
        }
    }

    tracing::warn!(stem = %stem, "Invite code attempts exhausted, falling back to timestamp suffix");
    Ok(format!("{}{}", stem, timestamp_suffix()))
}
