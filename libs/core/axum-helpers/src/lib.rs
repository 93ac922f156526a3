//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries and domain crates.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, `/health`, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Validating JSON and query extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig, Environment};
//!
//! let router = create_router::<ApiDoc>(api_routes, &Environment::from_env())?
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router, health_router,
};

pub use http::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{ValidatedJson, ValidatedQuery, lenient_bool};
