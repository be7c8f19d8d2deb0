//! Session operations exposed to the transport layer.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use leadsim_core::models::*;
use leadsim_core::{debug, engine, phase, scoring, SimError};

use crate::store::SessionStore;

/// Resolver-facing service wrapping a [`SessionStore`].
///
/// Cheap to clone; clones share the store and the random source. Every
/// operation loads a copy of the session, works on it and writes it back.
#[derive(Clone)]
pub struct SimulationService {
    store: Arc<dyn SessionStore>,
    rng: Arc<Mutex<StdRng>>,
    debug_routes: bool,
}

impl SimulationService {
    pub fn new(store: Arc<dyn SessionStore>, rng: StdRng, debug_routes: bool) -> Self {
        Self {
            store,
            rng: Arc::new(Mutex::new(rng)),
            debug_routes,
        }
    }

    /// Build a service whose random source is seeded when `seed` is given.
    pub fn with_seed(store: Arc<dyn SessionStore>, seed: Option<u64>, debug_routes: bool) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(store, rng, debug_routes)
    }

    pub fn debug_routes(&self) -> bool {
        self.debug_routes
    }

    pub fn start_session(&self) -> Session {
        let now = Utc::now();
        let session = Session::new(Uuid::new_v4(), now);
        self.store.put(session.clone(), now);
        tracing::info!(session_id = %session.id, "Session started");
        session
    }

    /// Current state, after checking whether the phase should advance.
    pub fn get_session(&self, id: Uuid) -> Result<Session, SimError> {
        let now = Utc::now();
        let mut session = self.load(id)?;
        if phase::advance(&mut session, now).is_some() {
            self.store.put(session.clone(), now);
        }
        Ok(session)
    }

    pub fn submit_action(&self, id: Uuid, action: SimulationAction) -> Result<ActionResponse, SimError> {
        let now = Utc::now();
        let mut session = self.load(id)?;
        let kind = action.kind;

        let response = {
            let mut rng = self.rng.lock().expect("rng lock poisoned");
            engine::submit_action(&mut session, action, &mut *rng, now)
        };
        self.store.put(session, now);

        match response.error {
            Some(error) => tracing::warn!(
                session_id = %id,
                kind = kind.as_str(),
                error = error.as_str(),
                "Action rejected"
            ),
            None => tracing::debug!(session_id = %id, kind = kind.as_str(), "Action processed"),
        }
        Ok(response)
    }

    pub fn get_results(&self, id: Uuid) -> Result<SessionResults, SimError> {
        let now = Utc::now();
        let mut session = self.load(id)?;
        if phase::advance(&mut session, now).is_some() {
            self.store.put(session.clone(), now);
        }

        let results = scoring::session_results(&session, now)?;
        tracing::info!(
            session_id = %id,
            rating = results.overall_rating.as_str(),
            actions = results.actions_taken,
            "Results computed"
        );
        Ok(results)
    }

    /// Jump a session to `phase_name`. Debug use only.
    pub fn force_phase(&self, id: Uuid, phase_name: &str) -> Result<Session, SimError> {
        let now = Utc::now();
        let mut session = self.load(id)?;
        {
            let mut rng = self.rng.lock().expect("rng lock poisoned");
            debug::force_phase(&mut session, phase_name, &mut *rng, now)?;
        }
        self.store.put(session.clone(), now);
        Ok(session)
    }

    pub fn end_session(&self, id: Uuid) -> Result<(), SimError> {
        if self.store.delete(id) {
            tracing::info!(session_id = %id, "Session ended");
            Ok(())
        } else {
            Err(SimError::SessionNotFound(id))
        }
    }

    pub fn sweep_expired(&self) -> usize {
        let removed = self.store.sweep_expired(Utc::now());
        if removed > 0 {
            tracing::info!(removed, remaining = self.store.len(), "Swept expired sessions");
        }
        removed
    }

    fn load(&self, id: Uuid) -> Result<Session, SimError> {
        self.store
            .get(id, Utc::now())
            .ok_or(SimError::SessionNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> SimulationService {
        let store = Arc::new(MemoryStore::new(100, chrono::Duration::minutes(60)));
        SimulationService::with_seed(store, Some(11), true)
    }

    #[test]
    fn new_session_starts_meeting_the_team() {
        let service = service();
        let session = service.start_session();

        assert_eq!(session.phase, Phase::MeetTeam);
        assert_eq!(session.team_members.len(), 3);
        assert_eq!(session.available_tasks.len(), 5);
        assert_eq!(service.get_session(session.id).unwrap().id, session.id);
    }

    #[test]
    fn actions_are_persisted() {
        let service = service();
        let id = service.start_session().id;

        let response = service
            .submit_action(id, SimulationAction::delegate("sam", "market_research"))
            .unwrap();
        assert!(response.success);

        let session = service.get_session(id).unwrap();
        assert_eq!(session.actions.len(), 1);
        assert_eq!(session.team_members["sam"].workload, 46);
    }

    #[test]
    fn unknown_session_is_reported() {
        let service = service();
        let id = Uuid::new_v4();

        assert_eq!(service.get_session(id), Err(SimError::SessionNotFound(id)));
        assert_eq!(
            service.submit_action(id, SimulationAction::question("alex")).unwrap_err(),
            SimError::SessionNotFound(id)
        );
        assert_eq!(service.end_session(id), Err(SimError::SessionNotFound(id)));
    }

    #[test]
    fn results_require_completion() {
        let service = service();
        let id = service.start_session().id;

        assert_eq!(
            service.get_results(id).unwrap_err(),
            SimError::ResultsNotReady(Phase::MeetTeam)
        );

        service.force_phase(id, "completed").unwrap();
        let results = service.get_results(id).unwrap();
        assert_eq!(results.competency_scores.len(), 6);
        assert_eq!(results.actions_taken, 6);
    }

    #[test]
    fn force_phase_rejects_bad_names() {
        let service = service();
        let id = service.start_session().id;

        assert_eq!(
            service.force_phase(id, "overtime").unwrap_err(),
            SimError::InvalidPhase("overtime".to_string())
        );
    }

    #[test]
    fn ended_sessions_are_gone() {
        let service = service();
        let id = service.start_session().id;

        service.end_session(id).unwrap();
        assert!(service.get_session(id).is_err());
        assert_eq!(service.sweep_expired(), 0);
    }
}
