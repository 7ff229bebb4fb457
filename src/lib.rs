//! Accounts API: read-only HTTP endpoints over an in-memory account collection.
//!
//! Callers can list every account or filter by health or type code. All
//! responses share one JSON envelope, and every request runs inside a fixed
//! processing budget.

pub mod budget;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorType};
pub use routes::create_router;
pub use state::AppState;
