use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::member::{Mood, Team};

/// A single move made by the user.
///
/// Only the fields relevant to `kind` are read: delegation needs
/// `target_member` and `task_id`, messages need `target_member` and
/// `message`, questions need `target_member`, and conflict resolution reads
/// `data.approach`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub target_member: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl SimulationAction {
    fn of(kind: ActionKind) -> Self {
        Self {
            kind,
            target_member: None,
            task_id: None,
            message: None,
            data: None,
        }
    }

    pub fn delegate(target: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            target_member: Some(target.into()),
            task_id: Some(task_id.into()),
            ..Self::of(ActionKind::DelegateTask)
        }
    }

    pub fn message(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target_member: Some(target.into()),
            message: Some(text.into()),
            ..Self::of(ActionKind::SendMessage)
        }
    }

    pub fn question(target: impl Into<String>) -> Self {
        Self {
            target_member: Some(target.into()),
            ..Self::of(ActionKind::AskQuestion)
        }
    }

    pub fn conflict(approach: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("approach".to_string(), Value::String(approach.into()));
        Self {
            data: Some(data),
            ..Self::of(ActionKind::AddressConflict)
        }
    }

    /// Value of a string field in `data`, if present.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }
}

/// The kind of a [`SimulationAction`].
///
/// Anything the client sends that is not one of the four known kinds
/// deserializes to `Unknown` so the resolver can reject it with
/// `unknown_action` instead of failing the whole request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    DelegateTask,
    SendMessage,
    AddressConflict,
    AskQuestion,
    #[serde(other)]
    Unknown,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DelegateTask => "delegate_task",
            Self::SendMessage => "send_message",
            Self::AddressConflict => "address_conflict",
            Self::AskQuestion => "ask_question",
            Self::Unknown => "unknown",
        }
    }
}

/// Why the resolver rejected an action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionError {
    InvalidTarget,
    InvalidTask,
    UnknownAction,
}

impl ActionError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidTarget => "invalid_target",
            Self::InvalidTask => "invalid_task",
            Self::UnknownAction => "unknown_action",
        }
    }
}

/// Outcome of resolving one action.
///
/// `updated_team_state` is always the complete team after the action; for a
/// rejected action it equals the team before it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ActionError>,
    pub team_member_reaction: Option<String>,
    pub mood_change: Option<Mood>,
    pub updated_team_state: Team,
    #[serde(default)]
    pub consequences: Vec<String>,
}

impl ActionResponse {
    pub fn rejected(error: ActionError, message: impl Into<String>, team: Team) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error),
            team_member_reaction: None,
            mood_change: None,
            updated_team_state: team,
            consequences: Vec::new(),
        }
    }
}
