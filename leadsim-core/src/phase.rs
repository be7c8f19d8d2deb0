//! Time-gated phase progression.
//!
//! Phases advance only when [`advance`] is called, which happens after every
//! processed action and whenever a session is read. Nothing runs on a timer:
//! a session left alone past its threshold keeps its old phase until the next
//! access.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Phase, Session};

/// How long a session must stay in `phase` before it may move on.
pub fn phase_duration(phase: Phase) -> Option<Duration> {
    match phase {
        Phase::MeetTeam => Some(Duration::minutes(2)),
        Phase::DelegateTasks => Some(Duration::minutes(5)),
        Phase::NavigateConflicts => Some(Duration::minutes(3)),
        Phase::Completed => None,
    }
}

/// Move the session to its next phase if the current one has run its course.
///
/// Returns the phase entered, if any. At most one step is taken per call
/// since entering a phase restarts its clock at `now`.
pub fn advance(session: &mut Session, now: DateTime<Utc>) -> Option<Phase> {
    let threshold = phase_duration(session.phase)?;
    let elapsed = now - session.phase_start_time;
    if elapsed < threshold {
        return None;
    }

    let next = session.phase.next()?;
    tracing::info!(
        session_id = %session.id,
        from = session.phase.as_str(),
        to = next.as_str(),
        elapsed_secs = elapsed.num_seconds(),
        "Phase transition"
    );
    session.enter_phase(next, now);
    Some(next)
}
