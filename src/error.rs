//! Top-level error type for process startup.
//!
//! The health handler cannot fail, so there is no request-level error taxonomy;
//! everything that can go wrong happens before or while the listener is bound.

use crate::config::ConfigError;
use crate::http::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
