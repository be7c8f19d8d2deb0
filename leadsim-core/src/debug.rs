//! Debug-only phase override.
//!
//! Lets demos and tests jump straight to a later phase instead of waiting
//! out the real timers. Not part of normal play: the HTTP route that calls
//! this is only mounted when debug routes are enabled.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::SimError;
use crate::models::*;
use crate::resolver;

/// Delegations seeded when jumping past the delegation phase.
const SEEDED_DELEGATIONS: &[(&str, &str)] = &[
    ("alex", "backend_api"),
    ("jordan", "create_mockups"),
    ("sam", "market_research"),
];

/// Force `session` into the phase named `phase_name`.
///
/// Restarts the phase clock and seeds the history a user would plausibly
/// have built up before that phase, resolved through the normal resolver so
/// moods and workloads stay consistent. Seeding is skipped for any kind of
/// activity the session already has.
pub fn force_phase<R: Rng + ?Sized>(
    session: &mut Session,
    phase_name: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<(), SimError> {
    let phase =
        Phase::from_str(phase_name).ok_or_else(|| SimError::InvalidPhase(phase_name.to_string()))?;

    let mut seeded = Vec::new();
    if phase >= Phase::DelegateTasks && !has_kind(session, ActionKind::AskQuestion) {
        seeded.extend(session.team_members.keys().map(SimulationAction::question));
    }
    if phase >= Phase::NavigateConflicts && !has_kind(session, ActionKind::DelegateTask) {
        seeded.extend(
            SEEDED_DELEGATIONS
                .iter()
                .map(|(member, task)| SimulationAction::delegate(*member, *task)),
        );
    }

    for action in seeded {
        let response = resolver::resolve(&session.team_members, &action, rng);
        session.team_members = response.updated_team_state;
        session.actions.push(action);
    }

    tracing::warn!(
        session_id = %session.id,
        from = session.phase.as_str(),
        to = phase.as_str(),
        "Forcing phase (debug override)"
    );
    session.enter_phase(phase, now);
    Ok(())
}

fn has_kind(session: &Session, kind: ActionKind) -> bool {
    session.actions.iter().any(|a| a.kind == kind)
}
