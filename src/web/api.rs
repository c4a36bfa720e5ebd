use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use log::{info, warn};
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::algorithm::stepwise::StepwiseDijkstra;
use crate::graph::GraphStore;
use crate::web::models::*;
use crate::web::server::ServerConfig;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
    pub max_vertices: usize,
    pub session_timeout: Duration,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(&ServerConfig::default())
    }

    pub fn with_config(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions: config.max_sessions,
            max_vertices: config.max_vertices,
            session_timeout: Duration::minutes(config.session_timeout_minutes as i64),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/graphs/:session_id/edges", post(add_edge))
        .route("/api/graphs/:session_id/run", post(start_run).delete(discard_run))
        .route("/api/graphs/:session_id/step", post(step_run))
        .route("/api/graphs/:session_id/snapshot", get(get_snapshot))
        .route("/api/graphs/:session_id/path/:target", get(get_path))
        .route("/api/graphs/:session_id/paths", get(list_paths))
        .route("/api/sessions", get(list_sessions))
        .route("/api/health", get(health_check))
}

/// Create a new graph store
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<CreateGraphRequest>,
) -> ApiResult<GraphView> {
    if request.vertex_count > state.max_vertices {
        warn!("rejected graph of {} vertices", request.vertex_count);
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse {
            error: "too_many_vertices".to_string(),
            message: format!("A graph may have at most {} vertices", state.max_vertices),
            details: Some(serde_json::json!({ "max_vertices": state.max_vertices })),
        })));
    }
    let graph = GraphStore::new(request.vertex_count, request.mode).map_err(api_error)?;

    let mut sessions = lock_sessions(&state)?;
    let cutoff = Utc::now() - state.session_timeout;
    let before = sessions.len();
    sessions.retain(|_, session| session.last_active >= cutoff);
    if sessions.len() < before {
        info!("expired {} idle sessions", before - sessions.len());
    }

    if sessions.len() >= state.max_sessions {
        warn!("session limit of {} reached", state.max_sessions);
        return Err((StatusCode::SERVICE_UNAVAILABLE, Json(ErrorResponse {
            error: "too_many_sessions".to_string(),
            message: format!("Session limit of {} reached", state.max_sessions),
            details: None,
        })));
    }

    let session = Session::new(graph);
    let view = session.view();
    info!(
        "created session {} with {} vertices ({:?})",
        session.id, request.vertex_count, request.mode
    );
    sessions.insert(session.id, session);

    Ok(Json(view))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<GraphView> {
    with_session(&state, session_id, |session| Ok(session.view()))
}

/// Append an edge; rejected while a run holds the graph
pub async fn add_edge(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AddEdgeRequest>,
) -> ApiResult<GraphView> {
    with_session(&state, session_id, |session| {
        if session.run.is_some() {
            return Err(Error::GraphFrozen);
        }
        let graph = Arc::get_mut(&mut session.graph).ok_or(Error::GraphFrozen)?;
        graph.add_edge(request.from, request.to, OrderedFloat(request.weight))?;
        Ok(session.view())
    })
}

/// Start a fresh run from a source, replacing any previous run
pub async fn start_run(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<StartRunRequest>,
) -> ApiResult<SnapshotView> {
    with_session(&state, session_id, |session| {
        let run = StepwiseDijkstra::initialize(Arc::clone(&session.graph), request.source)?;
        let view = SnapshotView::from(&run.snapshot());
        session.run = Some(run);
        Ok(view)
    })
}

/// Drop the active run so the graph can be edited again
pub async fn discard_run(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<GraphView> {
    with_session(&state, session_id, |session| {
        session.run.take().ok_or(Error::NoActiveRun)?;
        Ok(session.view())
    })
}

/// Advance the active run by one step
pub async fn step_run(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StepView> {
    with_session(&state, session_id, |session| {
        let run = session.run.as_mut().ok_or(Error::NoActiveRun)?;
        Ok(StepView::from(&run.step()))
    })
}

/// Current run state
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<SnapshotView> {
    with_session(&state, session_id, |session| {
        let run = session.run.as_ref().ok_or(Error::NoActiveRun)?;
        Ok(SnapshotView::from(&run.snapshot()))
    })
}

/// Shortest path to a target of the active run
pub async fn get_path(
    State(state): State<AppState>,
    Path((session_id, target)): Path<(Uuid, usize)>,
) -> ApiResult<PathView> {
    with_session(&state, session_id, |session| {
        let run = session.run.as_ref().ok_or(Error::NoActiveRun)?;
        let path = run.path_to(target)?;
        Ok(PathView::new(path))
    })
}

/// Every path the active run can answer, ordered by target
pub async fn list_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Vec<PathView>> {
    with_session(&state, session_id, |session| {
        let run = session.run.as_ref().ok_or(Error::NoActiveRun)?;
        Ok(run.paths().into_iter().map(PathView::new).collect())
    })
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Vec<SessionSummary>> {
    let sessions = lock_sessions(&state)?;
    let mut summaries: Vec<SessionSummary> = sessions.values().map(Session::summary).collect();
    summaries.sort_by_key(|summary| summary.created_at);
    Ok(Json(summaries))
}

/// Health check endpoint
pub async fn health_check() -> ApiResult<serde_json::Value> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

fn lock_sessions(state: &AppState) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
    state.sessions.lock().map_err(|_| {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse {
            error: "state_poisoned".to_string(),
            message: "Session state is unavailable".to_string(),
            details: None,
        }))
    })
}

fn with_session<T, F>(state: &AppState, session_id: Uuid, f: F) -> ApiResult<T>
where
    F: FnOnce(&mut Session) -> crate::Result<T>,
{
    let mut sessions = lock_sessions(state)?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(Error::SessionNotFound)
        .map_err(api_error)?;
    session.touch();
    f(session).map(Json).map_err(api_error)
}

fn api_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::InvalidSize => (StatusCode::BAD_REQUEST, "invalid_size"),
        Error::VertexOutOfRange(_) => (StatusCode::BAD_REQUEST, "vertex_out_of_range"),
        Error::NegativeWeight(_) => (StatusCode::BAD_REQUEST, "negative_weight"),
        Error::WeightTooLarge(_) => (StatusCode::BAD_REQUEST, "weight_too_large"),
        Error::Unreachable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "unreachable"),
        Error::NotSettled(_) => (StatusCode::CONFLICT, "not_settled"),
        Error::SessionNotFound => (StatusCode::NOT_FOUND, "session_not_found"),
        Error::GraphFrozen => (StatusCode::CONFLICT, "graph_frozen"),
        Error::NoActiveRun => (StatusCode::CONFLICT, "no_active_run"),
    };

    (status, Json(ErrorResponse {
        error: code.to_string(),
        message: err.to_string(),
        details: None,
    }))
}
