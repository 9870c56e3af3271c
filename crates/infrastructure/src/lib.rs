//! Storage and cache adapters for the robomart delivery backend.
//!
//! The MySQL adapters implement the workflow ports over `sqlx`; the
//! in-memory adapters back tests and local development without a
//! database.

pub mod adapters;
pub mod errors;
