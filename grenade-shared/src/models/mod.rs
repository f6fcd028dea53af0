/// Database models for Creator Grenade
///
/// Each model owns its SQL in `impl` blocks taking a `&PgPool`. Code that must
/// also run without PostgreSQL goes through [`crate::store::ContentStore`]
/// instead of calling these directly.
///
/// # Models
///
/// - `user`: Identities created by the magic-link flow
/// - `magic_link`: Single-use login tokens (hashed)
/// - `workspace`: One workspace per identity
/// - `membership`: Identity-workspace roles
/// - `content_item`: Library entries

pub mod content_item;
pub mod magic_link;
pub mod membership;
pub mod user;
pub mod workspace;
