/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Magic-link sign-in, refresh, session
/// - `items`: Workspace content library
/// - `generate`: AI suggestions

pub mod auth;
pub mod generate;
pub mod health;
pub mod items;
