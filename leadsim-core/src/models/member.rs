use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Team mapping keyed by member id (`alex`, `jordan`, `sam`).
pub type Team = BTreeMap<String, TeamMember>;

/// A scripted team member.
///
/// Identity, skills, personality and trigger points never change. `mood`,
/// `workload` and `current_tasks` are mutated only by the action resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub description: String,
    pub mood: Mood,
    /// Hours of assigned work. Conceptually 0-100 but never clamped.
    pub workload: i32,
    pub skills: Vec<String>,
    /// Trait name to strength (1-10).
    pub personality_traits: BTreeMap<String, u8>,
    pub trigger_points: Vec<String>,
    /// Names of delegated tasks, in delegation order. Append-only.
    pub current_tasks: Vec<String>,
}

impl TeamMember {
    pub fn has_any_skill(&self, required: &[String]) -> bool {
        required.iter().any(|skill| self.skills.contains(skill))
    }
}

/// How a team member currently feels.
///
/// [`Mood::improved`] moves one step along `Frustrated` → `Neutral` → `Happy`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Frustrated,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Frustrated => "frustrated",
        }
    }

    /// One step toward `Happy`. `Happy` stays `Happy`.
    pub fn improved(self) -> Self {
        match self {
            Self::Frustrated => Self::Neutral,
            Self::Neutral | Self::Happy => Self::Happy,
        }
    }

    /// Contribution to team morale: happy 1.0, neutral 0.5, frustrated 0.0.
    pub fn morale(self) -> f64 {
        match self {
            Self::Happy => 1.0,
            Self::Neutral => 0.5,
            Self::Frustrated => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improved_steps_toward_happy() {
        assert_eq!(Mood::Frustrated.improved(), Mood::Neutral);
        assert_eq!(Mood::Neutral.improved(), Mood::Happy);
        assert_eq!(Mood::Happy.improved(), Mood::Happy);
    }
}
