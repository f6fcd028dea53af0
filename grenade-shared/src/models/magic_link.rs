/// Magic link model and database operations
///
/// A magic link is a single-use login token mailed to an address. The plaintext
/// token only ever exists in the email; the table stores its SHA-256 hash (see
/// [`crate::auth::magic_link`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE magic_links (
///     token_hash TEXT PRIMARY KEY,
///     email TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL,
///     consumed_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Stored login link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MagicLink {
    /// SHA-256 hex digest of the plaintext token
    pub token_hash: String,

    /// Normalized address the link was sent to
    pub email: String,

    /// When the link was issued
    pub created_at: DateTime<Utc>,

    /// Links are rejected after this instant
    pub expires_at: DateTime<Utc>,

    /// Set when the link is redeemed; a consumed link can't be reused
    pub consumed_at: Option<DateTime<Utc>>,
}

impl MagicLink {
    /// Whether the link can still be redeemed at `now`
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.consumed_at.is_none() && self.expires_at > now
    }
}

/// Input for issuing a new link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMagicLink {
    pub token_hash: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl MagicLink {
    /// Stores a newly issued link
    pub async fn create(pool: &PgPool, data: CreateMagicLink) -> Result<Self, sqlx::Error> {
        let link = sqlx::query_as::<_, MagicLink>(
            r#"
            INSERT INTO magic_links (token_hash, email, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token_hash, email, created_at, expires_at, consumed_at
            "#,
        )
        .bind(data.token_hash)
        .bind(data.email)
        .bind(data.expires_at)
        .fetch_one(pool)
        .await?;

        Ok(link)
    }

    /// Atomically redeems a link
    ///
    /// # Returns
    ///
    /// The link if it existed, was unconsumed and unexpired; None otherwise.
    /// A second call with the same hash always returns None.
    pub async fn consume(pool: &PgPool, token_hash: &str) -> Result<Option<Self>, sqlx::Error> {
        let link = sqlx::query_as::<_, MagicLink>(
            r#"
            UPDATE magic_links
            SET consumed_at = NOW()
            WHERE token_hash = $1
              AND consumed_at IS NULL
              AND expires_at > NOW()
            RETURNING token_hash, email, created_at, expires_at, consumed_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expires_in: Duration, consumed: bool) -> MagicLink {
        let now = Utc::now();
        MagicLink {
            token_hash: "abc".to_string(),
            email: "creator@example.com".to_string(),
            created_at: now,
            expires_at: now + expires_in,
            consumed_at: consumed.then_some(now),
        }
    }

    #[test]
    fn test_fresh_link_is_redeemable() {
        assert!(link(Duration::minutes(15), false).is_redeemable(Utc::now()));
    }

    #[test]
    fn test_expired_link_is_not_redeemable() {
        assert!(!link(Duration::minutes(-1), false).is_redeemable(Utc::now()));
    }

    #[test]
    fn test_consumed_link_is_not_redeemable() {
        assert!(!link(Duration::minutes(15), true).is_redeemable(Utc::now()));
    }
}
