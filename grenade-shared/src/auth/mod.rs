/// Authentication
///
/// Creators sign in without passwords: they request a link by email, redeem
/// it, and receive JWTs scoped to their workspace.
///
/// # Modules
///
/// - [`magic_link`]: single-use token generation and SHA-256 hashing
/// - [`mailer`]: link delivery
/// - [`login`]: request and redeem flow
/// - [`jwt`]: access/refresh token signing and validation
/// - [`middleware`]: Axum bearer-token layer
///
/// # Security Features
///
/// - **Link Tokens**: 40 random base62 chars, only the hash is stored, single use
/// - **JWT Tokens**: HS256 with 24h access and 30d refresh lifetimes

pub mod jwt;
pub mod login;
pub mod magic_link;
pub mod mailer;
pub mod middleware;
