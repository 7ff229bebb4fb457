//! Per-request processing budget.
//!
//! Every handler runs its work inside [`RequestBudget::race`]. The work future
//! is polled first, so a handler that is ready immediately always answers
//! itself. Only work that stays pending can lose to the timers: the processing
//! timeout answers with a timeout error, the context deadline with an internal
//! error.

use std::future::Future;
use std::time::Duration;

use axum::response::Response;

use crate::config::HandlerConfig;
use crate::error::ApiError;
use crate::response::{respond_error, JsonFormat};

pub const TIMED_OUT_MESSAGE: &str = "Request Timed Out";
pub const CONTEXT_DONE_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBudget {
    timeout: Duration,
    context_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
#[error("incorrect api options: request timeouts must be non-zero")]
pub struct BudgetError;

impl RequestBudget {
    pub fn new(timeout: Duration, context_timeout: Duration) -> Result<Self, BudgetError> {
        if timeout.is_zero() || context_timeout.is_zero() {
            return Err(BudgetError);
        }
        Ok(Self {
            timeout,
            context_timeout,
        })
    }

    pub fn from_config(config: &HandlerConfig) -> Result<Self, BudgetError> {
        Self::new(config.timeout(), config.context_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn context_timeout(&self) -> Duration {
        self.context_timeout
    }

    /// Run `work`, answering with an error envelope if it outlives the budget.
    pub async fn race<F>(&self, format: JsonFormat, work: F) -> Response
    where
        F: Future<Output = Response>,
    {
        let timer = tokio::time::sleep(self.timeout);
        let deadline = tokio::time::sleep(self.context_timeout);

        tokio::select! {
            biased;
            response = work => response,
            _ = timer => {
                tracing::warn!(timeout = ?self.timeout, "Request processing timed out");
                respond_error(format, &ApiError::timeout(TIMED_OUT_MESSAGE), None::<()>)
            }
            _ = deadline => {
                tracing::warn!(deadline = ?self.context_timeout, "Request context expired");
                respond_error(format, &ApiError::internal(CONTEXT_DONE_MESSAGE), None::<()>)
            }
        }
    }
}
