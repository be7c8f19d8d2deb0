use serde::{Deserialize, Serialize};

/// A delegable task from the fixed catalog.
///
/// Tasks are immutable. The resolver reads `estimated_hours`, `skills_required`
/// and `best_fit` when a task is delegated; the scoring engine reads `best_fit`
/// again at completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub estimated_hours: u32,
    pub skills_required: Vec<String>,
    pub urgency: Urgency,
    /// Id of the team member this task suits best.
    pub best_fit: String,
}

/// How soon a task needs to be done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}
