mod handlers;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::SimulationService;

pub use handlers::{ForcePhaseInput, StartSessionResponse};

pub fn create_router(service: SimulationService) -> Router {
    let mut api = Router::new()
        // Sessions
        .route("/session/start", post(handlers::start_session))
        .route("/session/{id}", delete(handlers::end_session))
        .route("/session/{id}/state", get(handlers::get_session_state))
        .route("/session/{id}/action", post(handlers::submit_action))
        .route("/session/{id}/results", get(handlers::get_session_results))
        // Health
        .route("/health", get(handlers::health));

    if service.debug_routes() {
        api = api.route("/session/{id}/debug/phase", post(handlers::force_phase));
    }

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
