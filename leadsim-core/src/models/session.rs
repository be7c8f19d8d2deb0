use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::SimulationAction;
use super::member::Team;
use super::task::Task;
use crate::roster;

/// One run of the leadership exercise.
///
/// A session is created in [`Phase::MeetTeam`] with a fresh roster and moves
/// forward through the phases as time passes. The action history is
/// append-only. Sessions are never persisted; they live in the session store
/// until they expire or are evicted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub phase: Phase,
    pub team_members: Team,
    pub actions: Vec<SimulationAction>,
    pub start_time: DateTime<Utc>,
    /// When the current phase was entered.
    pub phase_start_time: DateTime<Utc>,
    /// Snapshot of the task catalog taken at creation.
    pub available_tasks: Vec<Task>,
}

impl Session {
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            phase: Phase::MeetTeam,
            team_members: roster::initial_team(),
            actions: Vec::new(),
            start_time: now,
            phase_start_time: now,
            available_tasks: roster::task_catalog(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Enter `phase` and restart the phase clock.
    pub fn enter_phase(&mut self, phase: Phase, now: DateTime<Utc>) {
        self.phase = phase;
        self.phase_start_time = now;
    }
}

/// A stage of the simulated meeting.
///
/// Phases are ordered; a session only ever moves to the next one, except
/// through the debug override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    MeetTeam,
    DelegateTasks,
    NavigateConflicts,
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MeetTeam => "meet_team",
            Self::DelegateTasks => "delegate_tasks",
            Self::NavigateConflicts => "navigate_conflicts",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "meet_team" => Some(Self::MeetTeam),
            "delegate_tasks" => Some(Self::DelegateTasks),
            "navigate_conflicts" => Some(Self::NavigateConflicts),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::MeetTeam => Some(Self::DelegateTasks),
            Self::DelegateTasks => Some(Self::NavigateConflicts),
            Self::NavigateConflicts => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
