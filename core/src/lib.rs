//! masquerade-core: the badge engine behind the Masquerade cosplay
//! community.
//!
//! The wider application (registration, profiles, competitions, review)
//! calls in through [`triggers`]; the engine evaluates the injected
//! [`catalog::BadgeCatalog`] against a user's persisted state and
//! idempotently records awards plus notifications. [`progress`] serves
//! the read-only badge listing.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod models;
pub mod progress;
pub mod rules;
pub mod store;
pub mod triggers;
pub mod types;
