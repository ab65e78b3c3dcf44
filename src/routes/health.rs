//! Liveness route of the email service.
//!
//! `GET /health` answers "Server running" whenever the process can serve HTTP.
//! Monitoring and browser status pages poll it before routing mail traffic here.

use crate::config::HEALTH_BODY;

/// Health check handler.
///
/// Returns the fixed "Server running" body. This is a liveness probe - it only
/// checks that the process can respond to HTTP, not that the mail transport or
/// any other dependency is reachable.
pub async fn health() -> &'static str {
    HEALTH_BODY
}
