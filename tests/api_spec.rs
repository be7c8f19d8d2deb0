use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use leadsim::api::{create_router, StartSessionResponse};
use leadsim::service::SimulationService;
use leadsim::store::MemoryStore;
use leadsim_core::models::*;
use uuid::Uuid;

fn setup_with(debug_routes: bool) -> TestServer {
    let store = Arc::new(MemoryStore::new(50, chrono::Duration::minutes(60)));
    let service = SimulationService::with_seed(store, Some(7), debug_routes);
    let app = create_router(service);
    TestServer::new(app).expect("Failed to create test server")
}

fn setup() -> TestServer {
    setup_with(true)
}

async fn start_session(server: &TestServer) -> Uuid {
    let response = server.post("/api/session/start").await;
    response.assert_status(StatusCode::CREATED);
    response.json::<StartSessionResponse>().session_id
}

async fn force_phase(server: &TestServer, id: Uuid, phase: &str) -> Session {
    let response = server
        .post(&format!("/api/session/{}/debug/phase", id))
        .json(&serde_json::json!({ "phase": phase }))
        .await;
    response.assert_status_ok();
    response.json::<Session>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/api/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

mod session_lifecycle {
    use super::*;

    #[tokio::test]
    async fn new_session_starts_in_meet_team() {
        let server = setup();
        let id = start_session(&server).await;

        let response = server.get(&format!("/api/session/{}/state", id)).await;

        response.assert_status_ok();
        let session: Session = response.json();
        assert_eq!(session.id, id);
        assert_eq!(session.phase, Phase::MeetTeam);
        assert_eq!(session.team_members.len(), 3);
        assert_eq!(session.available_tasks.len(), 5);
        assert!(session.actions.is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let server = setup();
        let id = Uuid::new_v4();

        server
            .get(&format!("/api/session/{}/state", id))
            .await
            .assert_status_not_found();
        server
            .post(&format!("/api/session/{}/action", id))
            .json(&SimulationAction::question("alex"))
            .await
            .assert_status_not_found();
        server
            .get(&format!("/api/session/{}/results", id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let server = setup();
        let id = start_session(&server).await;

        server
            .delete(&format!("/api/session/{}", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/session/{}/state", id))
            .await
            .assert_status_not_found();
        server
            .delete(&format!("/api/session/{}", id))
            .await
            .assert_status_not_found();
    }
}

mod actions {
    use super::*;

    #[tokio::test]
    async fn delegation_updates_team_state() {
        let server = setup();
        let id = start_session(&server).await;

        let response = server
            .post(&format!("/api/session/{}/action", id))
            .json(&SimulationAction::delegate("alex", "backend_api"))
            .await;

        response.assert_status_ok();
        let result: ActionResponse = response.json();
        assert!(result.success);
        assert_eq!(result.mood_change, Some(Mood::Happy));
        assert_eq!(result.updated_team_state["alex"].workload, 42);

        let session: Session = server
            .get(&format!("/api/session/{}/state", id))
            .await
            .json();
        assert_eq!(session.actions.len(), 1);
        assert_eq!(session.team_members["alex"].current_tasks, vec!["Develop Backend API"]);
    }

    #[tokio::test]
    async fn invalid_target_is_a_failed_response_not_an_error() {
        let server = setup();
        let id = start_session(&server).await;

        let response = server
            .post(&format!("/api/session/{}/action", id))
            .json(&serde_json::json!({
                "type": "send_message",
                "target_member": "morgan",
                "message": "hello"
            }))
            .await;

        response.assert_status_ok();
        let result: ActionResponse = response.json();
        assert!(!result.success);
        assert_eq!(result.error, Some(ActionError::InvalidTarget));
    }

    #[tokio::test]
    async fn unknown_action_type_is_rejected_and_not_recorded() {
        let server = setup();
        let id = start_session(&server).await;

        let result: ActionResponse = server
            .post(&format!("/api/session/{}/action", id))
            .json(&serde_json::json!({ "type": "order_pizza" }))
            .await
            .json();
        assert_eq!(result.error, Some(ActionError::UnknownAction));

        let session: Session = server
            .get(&format!("/api/session/{}/state", id))
            .await
            .json();
        assert!(session.actions.is_empty());
    }

    #[tokio::test]
    async fn conflict_approach_is_read_from_data() {
        let server = setup();
        let id = start_session(&server).await;

        let result: ActionResponse = server
            .post(&format!("/api/session/{}/action", id))
            .json(&serde_json::json!({
                "type": "address_conflict",
                "data": { "approach": "private_meetings" }
            }))
            .await
            .json();

        assert!(result.success);
        assert_eq!(result.updated_team_state["sam"].mood, Mood::Happy);
        assert_eq!(result.updated_team_state["jordan"].mood, Mood::Happy);
        assert_eq!(result.updated_team_state["alex"].mood, Mood::Neutral);
    }
}

mod results {
    use super::*;

    #[tokio::test]
    async fn not_ready_before_completion() {
        let server = setup();
        let id = start_session(&server).await;

        let response = server.get(&format!("/api/session/{}/results", id)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("not completed"));
    }

    #[tokio::test]
    async fn six_scores_after_completion() {
        let server = setup();
        let id = start_session(&server).await;
        server
            .post(&format!("/api/session/{}/action", id))
            .json(&SimulationAction::conflict("address_both"))
            .await
            .assert_status_ok();
        force_phase(&server, id, "completed").await;

        let response = server.get(&format!("/api/session/{}/results", id)).await;

        response.assert_status_ok();
        let results: SessionResults = response.json();
        assert_eq!(results.session_id, id);
        assert_eq!(results.competency_scores.len(), 6);
        assert_eq!(results.actions_taken, 7);
        assert!(results.competency_scores.values().all(|s| s.score <= 100));
        assert!(results
            .competency_scores
            .contains_key(&Competency::EquityInclusion));
    }

    #[tokio::test]
    async fn scoring_twice_gives_same_scores() {
        let server = setup();
        let id = start_session(&server).await;
        force_phase(&server, id, "completed").await;

        let first: SessionResults = server
            .get(&format!("/api/session/{}/results", id))
            .await
            .json();
        let second: SessionResults = server
            .get(&format!("/api/session/{}/results", id))
            .await
            .json();

        assert_eq!(first.competency_scores, second.competency_scores);
        assert_eq!(first.overall_rating, second.overall_rating);
    }
}

mod debug_phase {
    use super::*;

    #[tokio::test]
    async fn forces_phase_and_seeds_history() {
        let server = setup();
        let id = start_session(&server).await;

        let session = force_phase(&server, id, "navigate_conflicts").await;

        assert_eq!(session.phase, Phase::NavigateConflicts);
        assert_eq!(session.actions.len(), 6);
        assert_eq!(session.team_members["jordan"].workload, 33);
    }

    #[tokio::test]
    async fn rejects_unknown_phase() {
        let server = setup();
        let id = start_session(&server).await;

        let response = server
            .post(&format!("/api/session/{}/debug/phase", id))
            .json(&serde_json::json!({ "phase": "coffee_break" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("coffee_break"));
    }

    #[tokio::test]
    async fn route_is_absent_without_debug_flag() {
        let server = setup_with(false);
        let id = start_session(&server).await;

        server
            .post(&format!("/api/session/{}/debug/phase", id))
            .json(&serde_json::json!({ "phase": "completed" }))
            .await
            .assert_status_not_found();
    }
}
