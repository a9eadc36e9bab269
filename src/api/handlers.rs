//! HTTP request handlers for the Leave Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::CorsConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, LeaveAction, LeaveId, NewEmployee};

use super::request::{ApplyLeaveRequest, CreateEmployeeRequest};
use super::response::{ApiErrorResponse, BalanceView, EmployeeView, HealthResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/employees",
            post(create_employee_handler).get(list_employees_handler),
        )
        .route("/employees/:id", get(get_employee_handler))
        .route("/employees/:id/leave", get(leave_balance_handler))
        .route("/leaves", get(list_leaves_handler))
        .route("/leaves/apply", post(apply_leave_handler))
        .route("/leaves/:id/:action", post(act_on_leave_handler))
        .with_state(state)
}

/// Creates the router wrapped in request tracing and CORS layers.
///
/// # Errors
///
/// Returns a configuration error if an allowed origin is not a valid
/// header value.
pub fn create_app(state: AppState, cors: &CorsConfig) -> EngineResult<Router> {
    Ok(create_router(state)
        .layer(cors_layer(cors)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(config: &CorsConfig) -> EngineResult<CorsLayer> {
    let origin = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| EngineError::ConfigParseError {
                    path: "cors.allowed_origins".to_string(),
                    message: format!("invalid origin '{}': {}", origin, e),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

fn parse_id<T: FromStr>(entity: &str, raw: &str) -> ApiResult<T> {
    raw.parse().map_err(|_| {
        EngineError::validation(format!("Invalid {} id '{}'", entity, raw)).into()
    })
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let Json(request) = payload.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Rejected request body");
        ApiErrorResponse::from_rejection(rejection)
    })?;

    let result = async {
        let new_employee = NewEmployee::try_from(request)?;
        let employee = state.registry().create_employee(new_employee).await?;
        let balance = state.ledger().balance(employee.id).await?;
        Ok::<_, EngineError>(EmployeeView {
            employee,
            leave_balance: balance.balance,
        })
    }
    .await;

    match result {
        Ok(view) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %view.employee.id,
                "Employee created"
            );
            Ok((StatusCode::CREATED, Json(view)))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Create employee failed");
            Err(err.into())
        }
    }
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let employees = state.registry().list_employees().await?;
    let mut views = Vec::with_capacity(employees.len());
    for employee in employees {
        let balance = state.ledger().balance(employee.id).await?;
        views.push(EmployeeView {
            employee,
            leave_balance: balance.balance,
        });
    }
    Ok(Json(views))
}

/// Handler for GET /employees/{id}.
async fn get_employee_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(raw_id) = path.map_err(ApiErrorResponse::from_path_rejection)?;
    let id: EmployeeId = parse_id("employee", &raw_id)?;

    let employee = state.registry().get_employee(id).await?;
    let balance = state.ledger().balance(id).await?;
    Ok(Json(EmployeeView {
        employee,
        leave_balance: balance.balance,
    }))
}

/// Handler for GET /employees/{id}/leave.
async fn leave_balance_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(raw_id) = path.map_err(ApiErrorResponse::from_path_rejection)?;
    let id: EmployeeId = parse_id("employee", &raw_id)?;

    let employee = state.registry().get_employee(id).await?;
    let balance = state.ledger().balance(id).await?;
    Ok(Json(BalanceView::new(&employee, balance)))
}

/// Handler for POST /leaves/apply.
///
/// Responds 201 even when the request exceeds the balance; the body then
/// carries a `warning`.
async fn apply_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApplyLeaveRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave application");

    let Json(request) = payload.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Rejected request body");
        ApiErrorResponse::from_rejection(rejection)
    })?;

    let result = async {
        let (start_date, end_date) = request.dates()?;
        state
            .ledger()
            .apply_leave(request.employee_id, start_date, end_date)
            .await
    }
    .await;

    match result {
        Ok(application) => {
            if let Some(warning) = &application.warning {
                warn!(
                    correlation_id = %correlation_id,
                    leave_id = %application.leave.id,
                    warning = %warning,
                    "Leave recorded over balance"
                );
            }
            Ok((StatusCode::CREATED, Json(application)))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                error = %err,
                "Leave application failed"
            );
            Err(err.into())
        }
    }
}

/// Handler for GET /leaves.
async fn list_leaves_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.ledger().list_leaves().await?))
}

/// Handler for POST /leaves/{id}/{action}.
async fn act_on_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let Path((raw_id, raw_action)) = path.map_err(ApiErrorResponse::from_path_rejection)?;
    let id: LeaveId = parse_id("leave", &raw_id)?;
    let action = LeaveAction::from_str(&raw_action)?;
    info!(
        correlation_id = %correlation_id,
        leave_id = %id,
        action = ?action,
        "Processing leave decision"
    );

    match state.ledger().act_on_leave(id, action).await {
        Ok(leave) => Ok(Json(leave)),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Leave decision failed");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_listed_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        };
        assert!(cors_layer(&config).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["http://bad\norigin".to_string()],
        };
        let err = cors_layer(&config).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        let result: ApiResult<LeaveId> = parse_id("leave", "abc");
        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.error.detail.contains("abc"));
    }
}
