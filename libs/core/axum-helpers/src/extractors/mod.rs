//! Custom extractors for Axum handlers.
//!
//! Both extractors reject through [`AppError`](crate::errors::AppError), so
//! malformed input always produces the standard error body.

pub mod validated_json;
pub mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::{ValidatedQuery, lenient_bool};
