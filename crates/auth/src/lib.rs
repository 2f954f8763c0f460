//! Authentication, sessions, and identity management.
//!
//! JWT-based authentication with Argon2 password hashing. Tokens are
//! stateless: the server keeps no session table and no revocation list, so
//! logout is client-side cookie removal and a leaked token remains valid
//! until natural expiry.
//!
//! ## Identity Types
//!
//! - [`Member`] — Registered user with credentials
//! - [`User`] — Request identity: anonymous or an authenticated member
//!
//! ## Security
//!
//! - [`Crypto`] — JWT signing and verification
//! - [`Claims`] — JWT payload structure
//! - [`password`] — Argon2 hashing and verification
//!
//! ## Request Plumbing (feature `server`)
//!
//! - [`Auth`] — authorization gate extractor for protected routes
//! - [`Visitor`] — best-effort session resolution for public routes
mod claims;
mod crypto;
mod dto;
mod identity;
mod member;
pub mod password;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use identity::*;
pub use member::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
