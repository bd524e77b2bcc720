use crate::api::responses::{
    DispatchErrorCode, DispatchErrorResponse, DispatchQuery, DispatchRequestBody,
    DispatchSuccessResponse, FleetErrorCode, FleetErrorResponse, FleetSuccessResponse,
    HealthErrorCode, HealthErrorResponse, HealthStatus, HealthSuccessResponse,
};
use crate::dispatch::estimate_fleet;
use crate::error::AppError;
use crate::lift::{LiftState, decode_lift_state};
use crate::request::validate_request;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, info};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
enum TimestampError {
    Format(time::error::Format),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Format(err) => write!(f, "timestamp format error: {err}"),
        }
    }
}

pub enum DispatchResponse {
    Success(DispatchSuccessResponse),
    Error {
        status: StatusCode,
        body: DispatchErrorResponse,
    },
}

impl IntoResponse for DispatchResponse {
    fn into_response(self) -> Response {
        match self {
            DispatchResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            DispatchResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

/// Dispatches against the most recent fleet snapshot.
pub async fn get_dispatch(
    State(state): State<Arc<RwLock<AppState>>>,
    query: Result<Query<DispatchQuery>, QueryRejection>,
) -> impl IntoResponse {
    let now = SystemTime::now();
    match query {
        Ok(Query(query)) => build_snapshot_dispatch_response(state, &query.request, now),
        Err(rejection) => dispatch_error(AppError::MalformedInput(rejection.body_text()), now),
    }
}

/// Dispatches against a fleet supplied by the caller.
pub async fn post_dispatch(
    body: Result<Json<DispatchRequestBody>, JsonRejection>,
) -> impl IntoResponse {
    let now = SystemTime::now();
    match body {
        Ok(Json(body)) => build_dispatch_response(&body.fleet, &body.request, now),
        Err(rejection) => dispatch_error(AppError::MalformedInput(rejection.body_text()), now),
    }
}

pub enum FleetResponse {
    Success(FleetSuccessResponse),
    Error {
        status: StatusCode,
        body: FleetErrorResponse,
    },
}

impl IntoResponse for FleetResponse {
    fn into_response(self) -> Response {
        match self {
            FleetResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            FleetResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn get_fleet(State(state): State<Arc<RwLock<AppState>>>) -> impl IntoResponse {
    build_fleet_response(state)
}

pub enum HealthResponse {
    Success {
        status: StatusCode,
        body: HealthSuccessResponse,
    },
    Error {
        status: StatusCode,
        body: HealthErrorResponse,
    },
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        match self {
            HealthResponse::Success { status, body } => (status, Json(body)).into_response(),
            HealthResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn get_health(State(state): State<Arc<RwLock<AppState>>>) -> impl IntoResponse {
    build_health_response(state, SystemTime::now())
}

fn build_snapshot_dispatch_response(
    state: Arc<RwLock<AppState>>,
    raw_request: &str,
    now: SystemTime,
) -> DispatchResponse {
    let guard = match state.read() {
        Ok(guard) => guard,
        Err(_) => {
            return dispatch_error(AppError::StateLock, now);
        }
    };
    let lifts = guard.fleet().map(|snapshot| snapshot.lifts.clone());
    drop(guard);

    match lifts {
        Some(lifts) => dispatch_fleet(&lifts, raw_request, now),
        None => match format_timestamp(now) {
            Ok(timestamp) => DispatchResponse::Error {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: DispatchErrorResponse {
                    error_code: DispatchErrorCode::NoData,
                    error_message: "No fleet snapshot available".to_string(),
                    timestamp,
                },
            },
            Err(_) => dispatch_internal_error("timestamp formatting failure"),
        },
    }
}

fn build_dispatch_response(
    encoded_fleet: &[String],
    raw_request: &str,
    now: SystemTime,
) -> DispatchResponse {
    let lifts: Result<Vec<LiftState>, _> = encoded_fleet
        .iter()
        .map(|raw| decode_lift_state(raw))
        .collect();
    match lifts {
        Ok(lifts) => dispatch_fleet(&lifts, raw_request, now),
        Err(err) => dispatch_error(err.into(), now),
    }
}

fn dispatch_fleet(lifts: &[LiftState], raw_request: &str, now: SystemTime) -> DispatchResponse {
    let result = validate_request(raw_request)
        .and_then(|request| estimate_fleet(lifts, request).map(|dispatch| (request, dispatch)));
    let (request, dispatch) = match result {
        Ok(found) => found,
        Err(err) => return dispatch_error(err, now),
    };

    let timestamp = match format_timestamp(now) {
        Ok(formatted) => formatted,
        Err(_) => return dispatch_internal_error("timestamp formatting failure"),
    };

    info!(
        request = %request,
        selected_lift = dispatch.selected() + 1,
        wait_time = dispatch.selected_wait_time(),
        "Lift dispatched"
    );

    DispatchResponse::Success(DispatchSuccessResponse {
        request: request.to_string(),
        lifts: lifts.iter().map(ToString::to_string).collect(),
        selected_index: dispatch.selected(),
        selected_lift: dispatch.selected() + 1,
        wait_times: dispatch.into_wait_times(),
        timestamp,
    })
}

fn dispatch_error(err: AppError, now: SystemTime) -> DispatchResponse {
    let (status, error_code) = match &err {
        AppError::InvalidRequest(_) | AppError::MalformedInput(_) => {
            (StatusCode::BAD_REQUEST, DispatchErrorCode::InvalidRequest)
        }
        AppError::InvalidLiftState(_) => {
            (StatusCode::BAD_REQUEST, DispatchErrorCode::InvalidLiftState)
        }
        AppError::EmptyFleet => {
            (StatusCode::SERVICE_UNAVAILABLE, DispatchErrorCode::EmptyFleet)
        }
        AppError::InternalInvariant(message) => return dispatch_internal_error(message),
        AppError::StateLock => {
            return dispatch_internal_error("state lock poisoned while reading fleet");
        }
        AppError::WatchSend => return dispatch_internal_error("watch channel send failed"),
    };

    match format_timestamp(now) {
        Ok(timestamp) => DispatchResponse::Error {
            status,
            body: DispatchErrorResponse {
                error_code,
                error_message: err.to_string(),
                timestamp,
            },
        },
        Err(_) => dispatch_internal_error("timestamp formatting failure"),
    }
}

fn dispatch_internal_error(message: &str) -> DispatchResponse {
    error!(
        message = message,
        "Internal error while handling /api/dispatch"
    );
    DispatchResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: DispatchErrorResponse {
            error_code: DispatchErrorCode::InternalError,
            error_message: INTERNAL_ERROR_MESSAGE.to_string(),
            timestamp: fallback_timestamp(),
        },
    }
}

fn build_fleet_response(state: Arc<RwLock<AppState>>) -> FleetResponse {
    let guard = match state.read() {
        Ok(guard) => guard,
        Err(_) => {
            return fleet_internal_error("state lock poisoned while reading fleet");
        }
    };
    let snapshot = guard.fleet().cloned();
    drop(guard);

    let Some(snapshot) = snapshot else {
        return match format_timestamp(SystemTime::now()) {
            Ok(timestamp) => FleetResponse::Error {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: FleetErrorResponse {
                    error_code: FleetErrorCode::NoData,
                    error_message: "No fleet snapshot available".to_string(),
                    timestamp,
                },
            },
            Err(_) => fleet_internal_error("timestamp formatting failure"),
        };
    };

    match format_timestamp(snapshot.timestamp) {
        Ok(timestamp) => FleetResponse::Success(FleetSuccessResponse {
            lifts: snapshot.lifts.iter().map(ToString::to_string).collect(),
            timestamp,
        }),
        Err(_) => fleet_internal_error("timestamp formatting failure"),
    }
}

fn fleet_internal_error(message: &str) -> FleetResponse {
    error!(message = message, "Internal error while handling /api/fleet");
    FleetResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: FleetErrorResponse {
            error_code: FleetErrorCode::InternalError,
            error_message: INTERNAL_ERROR_MESSAGE.to_string(),
            timestamp: fallback_timestamp(),
        },
    }
}

fn build_health_response(state: Arc<RwLock<AppState>>, now: SystemTime) -> HealthResponse {
    let guard = match state.read() {
        Ok(guard) => guard,
        Err(_) => {
            return health_internal_error("state lock poisoned while reading fleet");
        }
    };
    let lifts = guard.fleet().map_or(0, |snapshot| snapshot.lifts.len());
    drop(guard);

    let timestamp = match format_timestamp(now) {
        Ok(formatted) => formatted,
        Err(_) => {
            return health_internal_error("timestamp formatting failure");
        }
    };

    let (status_code, status) = if lifts > 0 {
        (StatusCode::OK, HealthStatus::Ok)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Ko)
    };

    HealthResponse::Success {
        status: status_code,
        body: HealthSuccessResponse {
            status,
            lifts,
            timestamp,
        },
    }
}

fn health_internal_error(message: &str) -> HealthResponse {
    error!(message = message, "Internal error while handling /api/health");
    HealthResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: HealthErrorResponse {
            error_code: HealthErrorCode::InternalError,
            error_message: INTERNAL_ERROR_MESSAGE.to_string(),
            timestamp: fallback_timestamp(),
        },
    }
}

fn format_timestamp(timestamp: SystemTime) -> Result<String, TimestampError> {
    let datetime = OffsetDateTime::from(timestamp);
    datetime.format(&Rfc3339).map_err(TimestampError::Format)
}

fn fallback_timestamp() -> String {
    format_timestamp(SystemTime::now()).unwrap_or_else(|err| {
        error!(error = %err, "Failed to format internal error timestamp");
        "1970-01-01T00:00:00Z".to_string()
    })
}
