//! # Creator Grenade Shared Library
//!
//! Domain types and logic used by the Creator Grenade API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `db`: Connection pool and migrations
//! - `store`: Storage backend abstraction (PostgreSQL and in-memory)
//! - `session`: Current identity and auth-state notifications
//! - `provision`: One workspace per identity
//! - `library`: Workspace-scoped content items, drafts and search
//! - `sync`: Per-creator library state that follows auth changes
//! - `generate`: Local hooks and angles, remote AI suggestions
//! - `auth`: Magic-link login, JWTs and Axum middleware

pub mod auth;
pub mod db;
pub mod generate;
pub mod library;
pub mod models;
pub mod provision;
pub mod session;
pub mod store;
pub mod sync;

/// Current version of the Creator Grenade shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
