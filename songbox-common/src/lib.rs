//! # Songbox Common Library
//!
//! Shared code for the Songbox bot:
//! - Title normalization for duplicate detection
//! - The song catalog and its flat-file store
//! - Caller identities
//! - Bootstrap configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod normalize;
pub mod store;

pub use catalog::{Catalog, RejectReason, RemoveOutcome, SubmitOutcome};
pub use error::{Error, Result};
pub use identity::{AdminId, Identity};
pub use normalize::normalize_title;
pub use store::SongStore;
