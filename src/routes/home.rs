//! Welcome handler.

use axum::{extract::State, response::Response};
use tracing::instrument;

use crate::response::{respond, JsonFormat};
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to Home page";

/// Static greeting, still answered inside the request budget.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>, format: JsonFormat) -> Response {
    state
        .budget
        .race(format, async move { respond(format, WELCOME_MESSAGE) })
        .await
}
