//! Account listing handlers.
//!
//! Filters are a single linear scan over the shared collection. Matches keep
//! the collection's insertion order.

use axum::{
    extract::State,
    http::Uri,
    response::Response,
};
use tracing::instrument;

use super::{query_value, reply};
use crate::error::ApiError;
use crate::model::{AccountHealth, AccountRecord, AccountType};
use crate::response::JsonFormat;
use crate::state::AppState;

pub const INVALID_HEALTH: &str = "Invalid Health";
pub const INVALID_TYPE: &str = "Invalid Type";
pub const ACCOUNT_NOT_FOUND: &str = "Account Not found";
pub const NO_ACCOUNTS_FOUND: &str = "No Accounts Found";

/// `GET /accountsByHealth?health=N`
#[instrument(name = "accounts::by_health", skip(state, format))]
pub async fn by_health(State(state): State<AppState>, format: JsonFormat, uri: Uri) -> Response {
    state
        .budget
        .race(format, async {
            let raw = query_value(&uri, "health");
            reply(format, filter_by_health(state.accounts.list(), raw.as_deref()))
        })
        .await
}

/// `GET /accountsByType?type=N`
#[instrument(name = "accounts::by_type", skip(state, format))]
pub async fn by_type(State(state): State<AppState>, format: JsonFormat, uri: Uri) -> Response {
    state
        .budget
        .race(format, async {
            let raw = query_value(&uri, "type");
            reply(format, filter_by_type(state.accounts.list(), raw.as_deref()))
        })
        .await
}

/// `GET /getAll`
#[instrument(name = "accounts::get_all", skip(state))]
pub async fn get_all(State(state): State<AppState>, format: JsonFormat) -> Response {
    state
        .budget
        .race(format, async {
            reply(format, all_accounts(state.accounts.list()))
        })
        .await
}

/// Parse a query code the way the API always has: a plain base-10 integer.
/// A missing parameter is treated like an empty one.
fn parse_code(raw: Option<&str>) -> Option<i64> {
    raw.unwrap_or_default().parse().ok()
}

fn non_empty(
    accounts: Vec<AccountRecord>,
    message: &str,
) -> Result<Vec<AccountRecord>, ApiError> {
    if accounts.is_empty() {
        Err(ApiError::not_found(message))
    } else {
        Ok(accounts)
    }
}

/// Records whose health matches the code in `raw`.
///
/// A code outside the health table is valid input that simply matches nothing.
pub fn filter_by_health(
    accounts: &[AccountRecord],
    raw: Option<&str>,
) -> Result<Vec<AccountRecord>, ApiError> {
    let code = parse_code(raw).ok_or_else(|| ApiError::bad_request(INVALID_HEALTH))?;
    let health = AccountHealth::from_code(code);

    let matches = accounts
        .iter()
        .filter(|account| Some(account.account_health) == health)
        .cloned()
        .collect();
    non_empty(matches, ACCOUNT_NOT_FOUND)
}

/// Records whose type matches the code in `raw`.
pub fn filter_by_type(
    accounts: &[AccountRecord],
    raw: Option<&str>,
) -> Result<Vec<AccountRecord>, ApiError> {
    let code = parse_code(raw).ok_or_else(|| ApiError::bad_request(INVALID_TYPE))?;
    let account_type = AccountType::from_code(code);

    let matches = accounts
        .iter()
        .filter(|account| Some(account.account_type) == account_type)
        .cloned()
        .collect();
    non_empty(matches, ACCOUNT_NOT_FOUND)
}

pub fn all_accounts(accounts: &[AccountRecord]) -> Result<Vec<AccountRecord>, ApiError> {
    non_empty(accounts.to_vec(), NO_ACCOUNTS_FOUND)
}
