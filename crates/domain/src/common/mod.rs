//! Shared domain primitives used across all subdomains.

mod errors;

pub use errors::{DomainError, ValidationError};
