use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the six assessed competencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Competency {
    CriticalThinking,
    Communication,
    Teamwork,
    Leadership,
    Professionalism,
    EquityInclusion,
}

impl Competency {
    pub const ALL: [Competency; 6] = [
        Self::CriticalThinking,
        Self::Communication,
        Self::Teamwork,
        Self::Leadership,
        Self::Professionalism,
        Self::EquityInclusion,
    ];

    /// Display name shown in results.
    pub fn title(&self) -> &'static str {
        match self {
            Self::CriticalThinking => "Critical Thinking",
            Self::Communication => "Communication",
            Self::Teamwork => "Teamwork",
            Self::Leadership => "Leadership",
            Self::Professionalism => "Professionalism",
            Self::EquityInclusion => "Equity & Inclusion",
        }
    }
}

/// Assessment of a single competency.
///
/// `score` is clamped to 0-100. `evidence` lists one line per adjustment that
/// was applied, in the order the rules were evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetencyScore {
    pub name: String,
    pub score: u8,
    pub feedback: String,
    pub evidence: Vec<String>,
}

/// Summary rating derived from the mean of the six scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OverallRating {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl OverallRating {
    pub fn from_mean(mean: f64) -> Self {
        if mean >= 80.0 {
            Self::Excellent
        } else if mean >= 60.0 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Final results of a completed session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionResults {
    pub session_id: Uuid,
    pub competency_scores: BTreeMap<Competency, CompetencyScore>,
    /// Minutes since the session started.
    pub total_duration: f64,
    pub actions_taken: usize,
    pub overall_rating: OverallRating,
}
