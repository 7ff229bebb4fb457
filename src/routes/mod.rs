//! HTTP route handlers for the account API.
//!
//! Every handler answers with the JSON envelope from [`crate::response`] and
//! runs inside the request budget held in [`AppState`]. Account listings carry
//! a Cache-Control header since the dataset never changes while running.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod accounts;
pub mod health;
pub mod home;

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query, State},
    handler::Handler,
    http::{
        header::{HeaderValue, CACHE_CONTROL},
        request::Parts,
        Method, Uri,
    },
    middleware,
    response::Response,
    routing::{get, MethodRouter},
    Router,
};
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::instrument;

use crate::config::CACHE_CONTROL_ACCOUNTS;
use crate::error::ApiError;
use crate::middleware::request_id_layer;
use crate::response::{respond, respond_error, JsonFormat};
use crate::state::AppState;

/// First value of query parameter `key`, if present.
///
/// A query string that cannot be decoded is treated as having no parameters.
pub fn query_value(uri: &Uri, key: &str) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs.into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// Reads the `pretty` flag from the query string. Never rejects.
impl<S> FromRequestParts<S> for JsonFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(JsonFormat::from_flag(
            query_value(&parts.uri, "pretty").as_deref(),
        ))
    }
}

/// Turn a handler outcome into an envelope response.
pub fn reply<T: Serialize>(format: JsonFormat, result: Result<T, ApiError>) -> Response {
    match result {
        Ok(data) => respond(format, data),
        Err(err) => {
            tracing::debug!(error_type = ?err.kind, error = %err, "Request failed");
            respond_error(format, &err, None::<()>)
        }
    }
}

pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

/// Answers a request whose method no route accepts.
#[instrument(name = "routes::method_not_allowed", skip(state))]
pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: Method,
    format: JsonFormat,
) -> Response {
    state
        .budget
        .race(format, async {
            reply(
                format,
                Err::<(), _>(ApiError::bad_request(METHOD_NOT_ALLOWED)),
            )
        })
        .await
}

/// Paths without a route: GET and HEAD get the welcome page, anything else
/// is rejected like a wrong method on a known path.
async fn unmatched(state: State<AppState>, method: Method, format: JsonFormat) -> Response {
    if method == Method::GET || method == Method::HEAD {
        home::index(state, format).await
    } else {
        method_not_allowed(state, method, format).await
    }
}

/// GET route whose other methods answer with an error envelope.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(method_not_allowed)
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    let account_routes = Router::new()
        .route("/accountsByHealth", get_only(accounts::by_health))
        .route("/accountsByType", get_only(accounts::by_type))
        .route("/getAll", get_only(accounts::get_all))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_ACCOUNTS),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get_only(health::health));

    Router::new()
        .route("/", get_only(home::index))
        .merge(account_routes)
        .merge(health_routes)
        .fallback(unmatched)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
