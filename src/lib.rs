//! email-service liveness server.
//!
//! Serves `GET /health` with a fixed "Server running" body and wildcard CORS,
//! so orchestrators and browser dashboards can check that the process is up.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use error::AppError;
pub use routes::create_router;
