/// Magic-link tokens
///
/// Generation, hashing and format checks for single-use login tokens. The
/// plaintext token is mailed and never stored; the `magic_links` table keeps
/// only its SHA-256 digest (see [`crate::models::magic_link`]).
///
/// # Token Format
///
/// `mlk_` followed by 40 base62 characters (44 chars total).
///
/// # Example
///
/// ```
/// use grenade_shared::auth::magic_link::{generate_link_token, hash_link_token, validate_link_token_format};
///
/// let (token, hash) = generate_link_token();
/// assert!(token.starts_with("mlk_"));
/// assert!(validate_link_token_format(&token));
/// assert_eq!(hash_link_token(&token), hash);
/// ```

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::models::magic_link::CreateMagicLink;

const TOKEN_RANDOM_LENGTH: usize = 40;

const TOKEN_PREFIX: &str = "mlk_";

/// Total length of a link token
pub const LINK_TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// How long a link stays redeemable unless configured otherwise
pub const DEFAULT_LINK_TTL_MINUTES: i64 = 15;

/// Generates a token and its storage hash
///
/// Returns `(plaintext_token, sha256_hex)`.
pub fn generate_link_token() -> (String, String) {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    let random: String = (0..TOKEN_RANDOM_LENGTH)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    let token = format!("{}{}", TOKEN_PREFIX, random);
    let hash = hash_link_token(&token);

    (token, hash)
}

/// Hex-encoded SHA-256 of a token
pub fn hash_link_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Cheap shape check before any store lookup
pub fn validate_link_token_format(token: &str) -> bool {
    token.len() == LINK_TOKEN_LENGTH
        && token
            .strip_prefix(TOKEN_PREFIX)
            .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// A link ready to be stored and mailed
#[derive(Debug, Clone)]
pub struct IssuedLink {
    /// Plaintext token for the email only
    pub token: String,

    /// Row to persist
    pub record: CreateMagicLink,
}

/// Issues a link for `email` valid for `ttl` from `now`
pub fn issue_link(email: &str, ttl: Duration, now: DateTime<Utc>) -> IssuedLink {
    let (token, token_hash) = generate_link_token();
    IssuedLink {
        token,
        record: CreateMagicLink {
            token_hash,
            email: email.to_string(),
            expires_at: now + ttl,
        },
    }
}

/// Login URL embedding the token
pub fn login_url(base_url: &str, token: &str) -> String {
    format!("{}/auth/callback?token={}", base_url.trim_end_matches('/'), token)
}
