//! Authored guide documents and the authorization policy over them.
//!
//! A guide is a titled, tagged document of repeated sections, each a
//! (heading, body, optional image path) triple. The three per-section
//! sequences are stored as parallel arrays and are always equal-length.
//!
//! ## Types
//!
//! - [`Guide`] / [`Section`] — the document model
//! - [`Ownership`] — the edit/delete authorization policy
mod dto;
mod guide;
mod policy;

pub use dto::*;
pub use guide::*;
pub use policy::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
