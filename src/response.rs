//! Uniform JSON envelope for every API response.
//!
//! Success and error responses share one shape:
//! `{"status": "success"|"error", "data": ..., "errorType": ..., "error": ...}`
//! with absent fields omitted. Headers and status are always fixed before the
//! body is handed to the HTTP stack.

use axum::{
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::config::CACHE_CONTROL_ERROR;
use crate::error::{ApiError, ErrorType};

/// Message sent as plain text when an envelope cannot be serialized.
pub const MARSHAL_ERROR_MESSAGE: &str = "Error Marshalling the json response";

const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "errorType", skip_serializing_if = "ErrorType::is_none")]
    pub error_type: ErrorType,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            error_type: ErrorType::None,
            error: String::new(),
        }
    }

    pub fn error(err: &ApiError, data: Option<T>) -> Self {
        Self {
            status: Status::Error,
            data,
            error_type: err.kind,
            error: err.message.clone(),
        }
    }
}

/// JSON rendering mode, selected by the `pretty` query flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    #[default]
    Compact,
    /// Four-space indentation
    Pretty,
}

impl JsonFormat {
    /// Pretty when the flag is present, non-empty and not the literal "false".
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if !value.is_empty() && value != "false" => JsonFormat::Pretty,
            _ => JsonFormat::Compact,
        }
    }

    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            JsonFormat::Compact => serde_json::to_vec(value),
            JsonFormat::Pretty => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                value.serialize(&mut serializer)?;
                Ok(buf)
            }
        }
    }
}

/// Write a 200 success envelope around `data`.
pub fn respond<T: Serialize>(format: JsonFormat, data: T) -> Response {
    match format.render(&ApiResponse::success(data)) {
        Ok(body) => (StatusCode::OK, [(CONTENT_TYPE, APPLICATION_JSON)], body).into_response(),
        Err(e) => marshal_failure(e),
    }
}

/// Write an error envelope; the status code comes from the error's classification.
pub fn respond_error<T: Serialize>(format: JsonFormat, err: &ApiError, data: Option<T>) -> Response {
    match format.render(&ApiResponse::error(err, data)) {
        Ok(body) => (
            err.status_code(),
            [
                (CONTENT_TYPE, APPLICATION_JSON),
                (CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_ERROR)),
            ],
            body,
        )
            .into_response(),
        Err(e) => marshal_failure(e),
    }
}

fn marshal_failure(error: serde_json::Error) -> Response {
    tracing::error!(error = %error, "Failed to serialize response envelope");
    (StatusCode::INTERNAL_SERVER_ERROR, MARSHAL_ERROR_MESSAGE).into_response()
}
