//! API error types and their HTTP mapping.

mod api_error;

pub use api_error::ApiError;
