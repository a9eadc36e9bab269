//! HTTP API module for the Leave Engine.
//!
//! This module provides the REST endpoints for registering employees,
//! applying for leave, deciding requests and reading balances.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_app, create_router};
pub use request::{ApplyLeaveRequest, CreateEmployeeRequest};
pub use response::{ApiError, ApiErrorResponse, BalanceView, EmployeeView, HealthResponse};
pub use state::AppState;
