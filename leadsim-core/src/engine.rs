//! Applying a submitted action to a session.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::*;
use crate::{phase, resolver};

/// Resolve `action` against the session's team and fold the outcome back in.
///
/// The action is appended to the history even when the resolver rejects it
/// for a bad target or task; only actions of an unrecognized kind are left
/// out. The phase clock is checked afterwards.
pub fn submit_action<R: Rng + ?Sized>(
    session: &mut Session,
    action: SimulationAction,
    rng: &mut R,
    now: DateTime<Utc>,
) -> ActionResponse {
    let response = resolver::resolve(&session.team_members, &action, rng);

    if action.kind != ActionKind::Unknown {
        session.actions.push(action);
    }
    session.team_members = response.updated_team_state.clone();
    phase::advance(session, now);

    response
}
