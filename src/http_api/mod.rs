use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    EngineConfig, EnrolledCourse, Parity, ScheduleComputation, TermFeed, TimetableEngine,
    validate_courses,
};

/// Shared server state: the term feed, loaded once, and the engine.
#[derive(Clone)]
pub struct AppState {
    feed: Arc<RwLock<TermFeed>>,
    engine: Arc<TimetableEngine>,
}

impl AppState {
    pub fn new(feed: TermFeed, engine: TimetableEngine) -> Self {
        Self {
            feed: Arc::new(RwLock::new(feed)),
            engine: Arc::new(engine),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimetableRequest {
    courses: Vec<EnrolledCourse>,
    /// Student identifier whose parity selects the group; absent when unset.
    #[serde(default)]
    sdi: Option<i64>,
}

#[derive(Debug, Serialize)]
struct FeedInfo {
    term: Option<String>,
    entries: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/feed", get(get_feed))
        .route("/config", get(get_config))
        .route("/timetable", post(compute_timetable))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, feed: TermFeed, engine: TimetableEngine) -> std::io::Result<()> {
    let state = AppState::new(feed, engine);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("timetable HTTP API listening on http://{addr}");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_feed(State(state): State<AppState>) -> Json<FeedInfo> {
    let info = {
        let guard = state.feed.read();
        FeedInfo {
            term: guard.term.clone(),
            entries: guard.len(),
        }
    };
    Json(info)
}

async fn get_config(State(state): State<AppState>) -> Json<EngineConfig> {
    Json(state.engine.config())
}

async fn compute_timetable(
    State(state): State<AppState>,
    payload: Result<Json<TimetableRequest>, JsonRejection>,
) -> Result<Json<ScheduleComputation>, ApiError> {
    let Json(request) = payload?;
    validate_courses(&request.courses).map_err(|err| ApiError::invalid(err.to_string()))?;
    let parity = Parity::from_optional_identifier(request.sdi);
    let computation = {
        let guard = state.feed.read();
        state
            .engine
            .compute(&request.courses, &guard.schedule, parity)
    };
    Ok(Json(computation))
}
