//! Response types for the Leave Engine API.
//!
//! This module defines the response bodies, the error body and the mapping
//! from engine errors to HTTP status codes.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};
use crate::models::{Employee, LeaveBalance, LeaveWithEmployee};

/// API error response body: `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub detail: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for a request body that could not be decoded.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        let detail = match rejection {
            // serde's message, e.g. "missing field `email`"
            JsonRejection::JsonDataError(err) => err.body_text(),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Content-Type must be application/json".to_string()
            }
            _ => "Failed to parse request body".to_string(),
        };
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(detail),
        }
    }

    /// Creates a 400 response for a path that could not be decoded.
    pub fn from_path_rejection(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = match error.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Storage | ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(error.to_string()),
        }
    }
}

/// An employee with their current leave balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    /// The employee record.
    #[serde(flatten)]
    pub employee: Employee,
    /// Allowance minus approved days, computed at request time.
    pub leave_balance: i64,
}

/// Response body for `GET /employees/{id}/leave`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceView {
    /// Allowance minus approved days.
    pub balance: i64,
    /// The employee's requests, in submission order.
    pub leavehistory: Vec<LeaveWithEmployee>,
}

impl BalanceView {
    /// Builds the view, embedding `employee` in every history entry.
    pub fn new(employee: &Employee, balance: LeaveBalance) -> Self {
        let summary = employee.summary();
        Self {
            balance: balance.balance,
            leavehistory: balance
                .history
                .into_iter()
                .map(|leave| LeaveWithEmployee {
                    leave,
                    employee: summary.clone(),
                })
                .collect(),
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the service answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}
