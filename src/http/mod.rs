use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::profile::error::ProfileError;
use crate::state::AppState;

mod profile;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let profile_router = profile::router().with_state(state.clone());
    Router::new()
        .route("/health", get(health_live))
        .route("/health/ready", get(health_ready))
        .nest("/v1/profile", profile_router)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_live(State(state): State<AppState>) -> Result<Json<HealthResponse>, HttpError> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = HealthResponse {
        status: "live",
        uptime_seconds: uptime,
    };
    Ok(Json(response))
}

async fn health_ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, HttpError> {
    if let Some(database) = &state.database {
        database
            .ping()
            .await
            .map_err(|err| HttpError::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()))?;
    }

    let oracle_timeout_ms =
        u64::try_from(state.oracle_timeout.as_millis()).expect("Oracle timeout exceeds u64 bounds");

    let response = ReadyResponse {
        status: "ready",
        oracle_timeout_ms,
    };
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadyResponse {
    status: &'static str,
    oracle_timeout_ms: u64,
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: String) -> Self {
        assert!(status != StatusCode::OK, "Error status cannot be 200");
        assert!(!message.is_empty(), "Error message cannot be empty");
        Self { status, message }
    }

    /// Server-side failures are logged louder than client input errors.
    fn is_server_fault(&self) -> bool {
        self.status.is_server_error()
    }
}

impl From<ProfileError> for HttpError {
    fn from(err: ProfileError) -> Self {
        let status = match &err {
            ProfileError::NotFound(_) => StatusCode::NOT_FOUND,
            ProfileError::InvalidRequest => StatusCode::BAD_REQUEST,
            ProfileError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let message = match err {
            // Collaborator details stay in the server log.
            ProfileError::Unavailable(reason) => {
                warn!("Profile dependency unavailable: {reason}");
                "Service temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };
        Self::new(status, message)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.is_server_fault() {
            warn!(status = %self.status, "HTTP error: {}", self.message);
        } else {
            info!(status = %self.status, "HTTP error: {}", self.message);
        }
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}
