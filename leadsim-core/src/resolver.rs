//! Action resolution.
//!
//! [`resolve`] maps a team snapshot and one action to a new team snapshot
//! wrapped in an [`ActionResponse`]. The input team is never modified. The
//! only nondeterminism is the answer picked for `ask_question`, which comes
//! from the caller's generator.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::*;
use crate::roster::{self, CONFLICT_PAIR};

const POSITIVE_WORDS: &[&str] = &["great", "excellent", "appreciate", "thank", "good", "well done"];
const ENCOURAGING_WORDS: &[&str] = &["support", "help", "confident", "believe", "capable"];

/// Workload below which a well-fitting task makes a member happy.
const HAPPY_WORKLOAD_LIMIT: i32 = 50;
/// Workload above which a poorly-fitting task frustrates a member.
const FRUSTRATION_WORKLOAD_LIMIT: i32 = 40;
/// Workload above which a member is warned to be overloaded.
const OVERLOAD_WORKLOAD_LIMIT: i32 = 60;

pub fn resolve<R: Rng + ?Sized>(team: &Team, action: &SimulationAction, rng: &mut R) -> ActionResponse {
    let team = team.clone();
    match action.kind {
        ActionKind::DelegateTask => delegate_task(team, action),
        ActionKind::SendMessage => send_message(team, action),
        ActionKind::AddressConflict => address_conflict(team, action),
        ActionKind::AskQuestion => ask_question(team, action, rng),
        ActionKind::Unknown => {
            tracing::debug!("Rejecting action of unknown type");
            ActionResponse::rejected(ActionError::UnknownAction, "Unknown action type", team)
        }
    }
}

/// Look up the action's target, returning its id when it is on the team.
fn valid_target<'a>(team: &Team, action: &'a SimulationAction) -> Option<&'a str> {
    action
        .target_member
        .as_deref()
        .filter(|id| team.contains_key(*id))
}

fn invalid_target(team: Team) -> ActionResponse {
    ActionResponse::rejected(ActionError::InvalidTarget, "Invalid team member selected", team)
}

fn delegate_task(mut team: Team, action: &SimulationAction) -> ActionResponse {
    let Some(target) = valid_target(&team, action) else {
        return invalid_target(team);
    };
    let Some(task) = action.task_id.as_deref().and_then(roster::find_task) else {
        return ActionResponse::rejected(ActionError::InvalidTask, "Invalid task selected", team);
    };
    let Some(member) = team.get_mut(target) else {
        return invalid_target(team);
    };

    // Best fit and skill overlap are separate checks; both must hold.
    let is_best_fit = task.best_fit == target;
    let skill_match = member.has_any_skill(&task.skills_required);
    let good_fit = is_best_fit && skill_match;

    member.current_tasks.push(task.name.clone());
    member.workload += task.estimated_hours as i32;

    let reaction = if good_fit {
        if member.workload < HAPPY_WORKLOAD_LIMIT {
            member.mood = Mood::Happy;
            format!(
                "{} seems excited about this task - it's right in their wheelhouse!",
                member.name
            )
        } else {
            format!(
                "{} appreciates the good fit but looks concerned about their workload.",
                member.name
            )
        }
    } else if member.workload > FRUSTRATION_WORKLOAD_LIMIT {
        member.mood = Mood::Frustrated;
        format!(
            "{} looks overwhelmed - this task doesn't match their skills and they're already busy.",
            member.name
        )
    } else {
        format!("{} seems uncertain but willing to try.", member.name)
    };

    tracing::debug!(
        member = target,
        task = %task.id,
        good_fit,
        workload = member.workload,
        mood = member.mood.as_str(),
        "Resolved delegation"
    );

    let consequences = delegation_consequences(member, good_fit);
    let message = format!("Task '{}' delegated to {}", task.name, member.name);
    let mood = member.mood;

    ActionResponse {
        success: true,
        message,
        error: None,
        team_member_reaction: Some(reaction),
        mood_change: Some(mood),
        updated_team_state: team,
        consequences,
    }
}

fn delegation_consequences(member: &TeamMember, good_fit: bool) -> Vec<String> {
    let mut consequences = Vec::new();
    if !good_fit {
        consequences.push(format!(
            "{} may struggle with this task due to skill mismatch",
            member.name
        ));
    }
    if member.workload > OVERLOAD_WORKLOAD_LIMIT {
        consequences.push(format!(
            "{} is becoming overloaded and may burn out",
            member.name
        ));
    }
    if member.mood == Mood::Frustrated {
        consequences.push(format!(
            "{}'s frustration may affect team morale",
            member.name
        ));
    }
    consequences
}

/// True when the text reads as praise or encouragement.
pub fn is_supportive(text: &str) -> bool {
    let text = text.to_lowercase();
    POSITIVE_WORDS
        .iter()
        .chain(ENCOURAGING_WORDS)
        .any(|word| text.contains(word))
}

fn send_message(mut team: Team, action: &SimulationAction) -> ActionResponse {
    let Some(target) = valid_target(&team, action) else {
        return invalid_target(team);
    };
    let Some(member) = team.get_mut(target) else {
        return invalid_target(team);
    };

    let supportive = is_supportive(action.message.as_deref().unwrap_or_default());
    let reaction = if supportive {
        member.mood = member.mood.improved();
        format!("{} smiles and seems more motivated.", member.name)
    } else {
        format!("{} nods politely but seems unchanged.", member.name)
    };

    tracing::debug!(member = target, supportive, mood = member.mood.as_str(), "Resolved message");

    let message = format!("Message sent to {}", member.name);
    let mood = member.mood;

    ActionResponse {
        success: true,
        message,
        error: None,
        team_member_reaction: Some(reaction),
        mood_change: Some(mood),
        updated_team_state: team,
        consequences: Vec::new(),
    }
}

/// How the user chose to handle the standing conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictApproach {
    AddressBoth,
    PrivateMeetings,
    Neutral,
}

impl ConflictApproach {
    pub fn from_action(action: &SimulationAction) -> Self {
        match action.data_str("approach") {
            Some("address_both") => Self::AddressBoth,
            Some("private_meetings") => Self::PrivateMeetings,
            _ => Self::Neutral,
        }
    }
}

// The scenario is always the same two members; the action's target is ignored.
fn address_conflict(mut team: Team, action: &SimulationAction) -> ActionResponse {
    let approach = ConflictApproach::from_action(action);
    let (first, second) = CONFLICT_PAIR;

    let resolved_mood = match approach {
        ConflictApproach::AddressBoth => Some(Mood::Neutral),
        ConflictApproach::PrivateMeetings => Some(Mood::Happy),
        ConflictApproach::Neutral => None,
    };
    if let Some(mood) = resolved_mood {
        for id in [first, second] {
            if let Some(member) = team.get_mut(id) {
                member.mood = mood;
            }
        }
    }

    let reaction = match approach {
        ConflictApproach::AddressBoth => {
            "Both Sam and Jordan seem relieved that you're addressing the tension directly."
        }
        ConflictApproach::PrivateMeetings => {
            "Sam and Jordan appreciate the private approach - they both seem more comfortable."
        }
        ConflictApproach::Neutral => "The tension between Sam and Jordan remains unresolved.",
    };

    tracing::debug!(?approach, "Resolved conflict");

    ActionResponse {
        success: true,
        message: "Conflict resolution attempted".to_string(),
        error: None,
        team_member_reaction: Some(reaction.to_string()),
        mood_change: None,
        updated_team_state: team,
        consequences: Vec::new(),
    }
}

fn ask_question<R: Rng + ?Sized>(team: Team, action: &SimulationAction, rng: &mut R) -> ActionResponse {
    let Some(target) = valid_target(&team, action) else {
        return invalid_target(team);
    };
    let answer = roster::canned_answers(target)
        .choose(rng)
        .copied()
        .unwrap_or_default();
    let message = format!("Question asked to {}", team[target].name);

    ActionResponse {
        success: true,
        message,
        error: None,
        team_member_reaction: Some(answer.to_string()),
        mood_change: None,
        updated_team_state: team,
        consequences: Vec::new(),
    }
}
