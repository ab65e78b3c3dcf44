//! HTTP server module with optional TLS.
//!
//! This module binds the listener in one of two modes:
//! - **None (default)**: Plain HTTP, for use behind a proxy or inside a cluster
//! - **Manual**: User-provided certificate and key files
//!
//! The server includes:
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Certificate hot-reload via SIGHUP (manual mode)

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
pub use shutdown::setup_shutdown_handler;
