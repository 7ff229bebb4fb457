//! Health check endpoint for container orchestration.
//!
//! Returns 200 OK with a plain body while the process is running. Sits outside
//! the JSON envelope so probes stay trivial.

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
