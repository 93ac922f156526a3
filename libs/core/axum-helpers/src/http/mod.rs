//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers

pub mod cors;
pub mod security;

pub use cors::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
