/// User model and database operations
///
/// Users are identities created by the magic-link flow. There is no password;
/// the first verified login for an email address creates the row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use grenade_shared::models::user::User;
/// use grenade_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::find_or_create_by_email(&pool, "creator@example.com").await?;
/// println!("Signed in as {}", user.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::session::Identity;

/// User model representing a signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, stored trimmed and lowercased
    pub email: String,

    /// When the user first verified a login link
    pub created_at: DateTime<Utc>,

    /// When the user last logged in (None if never logged in)
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Returns the session identity for this user
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: Some(self.email.clone()),
        }
    }
}

/// Normalizes an email address for storage and lookup
///
/// # Example
///
/// ```
/// use grenade_shared::models::user::normalize_email;
///
/// assert_eq!(normalize_email("  Creator@Example.COM "), "creator@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Finds the user with this email, creating it on first login
    ///
    /// The email is normalized before lookup. Concurrent first logins for the
    /// same address resolve to the same row through the unique constraint.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn find_or_create_by_email(pool: &PgPool, email: &str) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email)
            VALUES ($1)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, email, created_at, last_login_at
            "#,
        )
        .bind(normalize_email(email))
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, created_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Records a successful login
    ///
    /// # Returns
    ///
    /// true if the user exists and was updated
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
