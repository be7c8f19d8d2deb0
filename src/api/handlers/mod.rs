use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadsim_core::models::*;
use leadsim_core::SimError;

use crate::service::SimulationService;

// ============================================================
// Error Handling
// ============================================================

/// Map a session error to a status code and its message.
///
/// All of these are caller mistakes, so they are logged at `warn` and the
/// message is passed through unchanged.
fn error_response(e: SimError) -> (StatusCode, String) {
    let status = match e {
        SimError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        SimError::ResultsNotReady(_) | SimError::InvalidPhase(_) => StatusCode::BAD_REQUEST,
    };
    tracing::warn!(code = e.code(), "Request failed: {}", e);
    (status, e.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Sessions
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: Uuid,
}

pub async fn start_session(
    State(service): State<SimulationService>,
) -> (StatusCode, Json<StartSessionResponse>) {
    let session = service.start_session();
    (
        StatusCode::CREATED,
        Json(StartSessionResponse {
            session_id: session.id,
        }),
    )
}

pub async fn get_session_state(
    State(service): State<SimulationService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, (StatusCode, String)> {
    service.get_session(id).map(Json).map_err(error_response)
}

pub async fn submit_action(
    State(service): State<SimulationService>,
    Path(id): Path<Uuid>,
    Json(action): Json<SimulationAction>,
) -> Result<Json<ActionResponse>, (StatusCode, String)> {
    service
        .submit_action(id, action)
        .map(Json)
        .map_err(error_response)
}

pub async fn get_session_results(
    State(service): State<SimulationService>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResults>, (StatusCode, String)> {
    service.get_results(id).map(Json).map_err(error_response)
}

pub async fn end_session(
    State(service): State<SimulationService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    service
        .end_session(id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

// ============================================================
// Debug
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForcePhaseInput {
    pub phase: String,
}

pub async fn force_phase(
    State(service): State<SimulationService>,
    Path(id): Path<Uuid>,
    Json(input): Json<ForcePhaseInput>,
) -> Result<Json<Session>, (StatusCode, String)> {
    service
        .force_phase(id, &input.phase)
        .map(Json)
        .map_err(error_response)
}
