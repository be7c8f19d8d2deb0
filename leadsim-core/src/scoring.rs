//! Competency scoring.
//!
//! Six independent assessments run over a completed session. Each starts at
//! [`BASE_SCORE`], applies additive adjustments, is clamped to 0-100 and picks
//! feedback from three tiers.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::error::SimError;
use crate::models::*;
use crate::roster;

pub const BASE_SCORE: i32 = 50;

/// Score accumulator for a single competency.
struct Assessment {
    competency: Competency,
    score: i32,
    evidence: Vec<String>,
}

impl Assessment {
    fn new(competency: Competency) -> Self {
        Self {
            competency,
            score: BASE_SCORE,
            evidence: Vec::new(),
        }
    }

    fn adjust(&mut self, delta: i32, evidence: impl Into<String>) {
        self.score += delta;
        self.evidence.push(evidence.into());
    }

    fn finish(self, feedback: [&str; 3]) -> CompetencyScore {
        let score = self.score.clamp(0, 100) as u8;
        let [high, mid, low] = feedback;
        let feedback = if score >= 80 {
            high
        } else if score >= 60 {
            mid
        } else {
            low
        };
        CompetencyScore {
            name: self.competency.title().to_string(),
            score,
            feedback: feedback.to_string(),
            evidence: self.evidence,
        }
    }
}

/// Compute all six competency scores.
///
/// Fails with [`SimError::ResultsNotReady`] unless the session is completed.
pub fn score_session(session: &Session) -> Result<BTreeMap<Competency, CompetencyScore>, SimError> {
    if !session.is_completed() {
        return Err(SimError::ResultsNotReady(session.phase));
    }

    let scores = Competency::ALL
        .iter()
        .map(|&competency| {
            let score = match competency {
                Competency::CriticalThinking => critical_thinking(session),
                Competency::Communication => communication(session),
                Competency::Teamwork => teamwork(session),
                Competency::Leadership => leadership(session),
                Competency::Professionalism => professionalism(session),
                Competency::EquityInclusion => equity_inclusion(session),
            };
            (competency, score)
        })
        .collect();
    Ok(scores)
}

/// Scores plus the summary fields reported to the user.
pub fn session_results(session: &Session, now: DateTime<Utc>) -> Result<SessionResults, SimError> {
    let competency_scores = score_session(session)?;
    let mean = competency_scores
        .values()
        .map(|s| f64::from(s.score))
        .sum::<f64>()
        / competency_scores.len() as f64;

    Ok(SessionResults {
        session_id: session.id,
        competency_scores,
        total_duration: minutes_between(session.start_time, now),
        actions_taken: session.actions.len(),
        overall_rating: OverallRating::from_mean(mean),
    })
}

fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}

fn actions_of(session: &Session, kind: ActionKind) -> impl Iterator<Item = &SimulationAction> {
    session.actions.iter().filter(move |a| a.kind == kind)
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Mean mood across the team, 0.0 (all frustrated) to 1.0 (all happy).
pub fn team_morale(team: &Team) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    team.values().map(|m| m.mood.morale()).sum::<f64>() / team.len() as f64
}

fn critical_thinking(session: &Session) -> CompetencyScore {
    let mut assessment = Assessment::new(Competency::CriticalThinking);
    let catalog: HashMap<String, Task> = roster::task_catalog()
        .into_iter()
        .map(|t| (t.id.clone(), t))
        .collect();

    for action in actions_of(session, ActionKind::DelegateTask) {
        let Some(task) = action.task_id.as_ref().and_then(|id| catalog.get(id)) else {
            continue;
        };
        let target = action.target_member.as_deref().unwrap_or("nobody");
        if task.best_fit == target {
            assessment.adjust(10, format!("Assigned {} to {} (good skill match)", task.name, target));
        } else {
            assessment.adjust(-5, format!("Assigned {} to {} (skill mismatch)", task.name, target));
        }
    }

    let workloads: Vec<f64> = session
        .team_members
        .values()
        .map(|m| f64::from(m.workload))
        .collect();
    if !workloads.is_empty() && population_std_dev(&workloads) < 15.0 {
        assessment.adjust(15, "Maintained balanced workload distribution");
    }

    assessment.finish([
        "Excellent strategic thinking! You demonstrated strong analytical skills in task assignment and priority setting.",
        "Good critical thinking with room for improvement. Consider team member strengths more carefully when delegating.",
        "Focus on developing analytical skills. Take time to assess team capabilities before making decisions.",
    ])
}

fn communication(session: &Session) -> CompetencyScore {
    let mut assessment = Assessment::new(Competency::Communication);
    let messages: Vec<_> = actions_of(session, ActionKind::SendMessage).collect();
    let questions: Vec<_> = actions_of(session, ActionKind::AskQuestion).collect();

    if !messages.is_empty() {
        let bonus = (messages.len() as i32 * 5).min(20);
        assessment.adjust(bonus, format!("Sent {} messages to team members", messages.len()));
    }
    if !questions.is_empty() {
        let bonus = (questions.len() as i32 * 7).min(15);
        assessment.adjust(bonus, format!("Asked {} questions to gather input", questions.len()));
    }

    let targets: BTreeSet<&str> = messages
        .iter()
        .chain(questions.iter())
        .filter_map(|a| a.target_member.as_deref())
        .filter(|id| session.team_members.contains_key(*id))
        .collect();
    if targets.len() >= 2 {
        assessment.adjust(10, "Communicated with multiple team members");
    }

    assessment.finish([
        "Outstanding communication! You actively engaged with team members and gathered valuable input.",
        "Good communication skills. Consider asking more questions to better understand team perspectives.",
        "Improve active listening and engagement. Regular communication builds trust and clarity.",
    ])
}

fn teamwork(session: &Session) -> CompetencyScore {
    let mut assessment = Assessment::new(Competency::Teamwork);

    if actions_of(session, ActionKind::AddressConflict).next().is_some() {
        assessment.adjust(20, "Proactively addressed team conflicts");
    }

    let team = &session.team_members;
    let happy = team.values().filter(|m| m.mood == Mood::Happy).count() as i32;
    let frustrated = team.values().filter(|m| m.mood == Mood::Frustrated).count() as i32;
    if happy > 0 {
        assessment.adjust(happy * 10, format!("{happy} team members ended in positive mood"));
    }
    if frustrated > 0 {
        assessment.adjust(-frustrated * 15, format!("{frustrated} team members ended frustrated"));
    }

    let with_tasks = team.values().filter(|m| !m.current_tasks.is_empty()).count();
    if with_tasks >= 2 {
        assessment.adjust(10, "Distributed tasks across multiple team members");
    }

    assessment.finish([
        "Excellent team management! You successfully maintained positive team dynamics and morale.",
        "Good teamwork skills. Pay attention to team member mood and address concerns promptly.",
        "Focus on team cohesion. Address conflicts early and ensure all members feel valued.",
    ])
}

fn leadership(session: &Session) -> CompetencyScore {
    let mut assessment = Assessment::new(Competency::Leadership);
    let total = session.actions.len();

    if total >= 5 {
        assessment.adjust(20, "Took decisive action throughout the simulation");
    } else if total >= 3 {
        assessment.adjust(10, "Took moderate action during the simulation");
    } else {
        assessment.adjust(-10, "Limited action taken during the simulation");
    }

    // NOTE: the first three actions hold at least two whenever two or more
    // actions exist at all, so this is effectively "took two actions".
    let early = session.actions.iter().take(3).count();
    if early >= 2 {
        assessment.adjust(15, "Demonstrated proactive leadership early in the session");
    }

    let morale = team_morale(&session.team_members);
    if morale > 0.6 {
        assessment.adjust(15, "Maintained high team morale");
    } else if morale < 0.3 {
        assessment.adjust(-15, "Team morale declined during the session");
    }

    assessment.finish([
        "Strong leadership presence! You took decisive action and maintained team confidence.",
        "Good leadership foundation. Be more proactive in decision-making and team guidance.",
        "Develop leadership confidence. Take initiative and provide clear direction to your team.",
    ])
}

fn distinct_kinds<'a>(actions: impl Iterator<Item = &'a SimulationAction>) -> usize {
    actions.map(|a| a.kind).collect::<BTreeSet<_>>().len()
}

fn professionalism(session: &Session) -> CompetencyScore {
    let mut assessment = Assessment::new(Competency::Professionalism);

    // Measured up to when the current phase was entered, not up to now.
    let minutes = minutes_between(session.start_time, session.phase_start_time);
    if (8.0..=12.0).contains(&minutes) {
        assessment.adjust(20, "Managed time effectively within meeting duration");
    } else if minutes > 15.0 {
        assessment.adjust(-10, "Meeting ran significantly over time");
    }

    if distinct_kinds(session.actions.iter()) >= 2 {
        assessment.adjust(10, "Used varied leadership approaches appropriately");
    }

    assessment.adjust(10, "Maintained professional demeanor throughout");

    assessment.finish([
        "Exemplary professionalism! You managed time well and maintained appropriate meeting standards.",
        "Good professional behavior. Focus on time management and meeting efficiency.",
        "Improve professional meeting management. Practice time awareness and structured approaches.",
    ])
}

fn equity_inclusion(session: &Session) -> CompetencyScore {
    let mut assessment = Assessment::new(Competency::EquityInclusion);
    let team = &session.team_members;

    let contacted: BTreeSet<&str> = session
        .actions
        .iter()
        .filter(|a| {
            matches!(
                a.kind,
                ActionKind::SendMessage | ActionKind::AskQuestion | ActionKind::DelegateTask
            )
        })
        .filter_map(|a| a.target_member.as_deref())
        .filter(|id| team.contains_key(*id))
        .collect();

    let ratio = if team.is_empty() {
        0.0
    } else {
        contacted.len() as f64 / team.len() as f64
    };
    if ratio >= 0.8 {
        assessment.adjust(25, "Engaged with most team members equally");
    } else if ratio >= 0.5 {
        assessment.adjust(15, "Engaged with majority of team members");
    } else {
        assessment.adjust(-10, "Limited engagement with team members");
    }

    let targeted = session.actions.iter().filter(|a| a.target_member.is_some());
    if distinct_kinds(targeted) >= 2 {
        assessment.adjust(15, "Adapted communication style for different situations");
    }

    assessment.finish([
        "Excellent inclusive leadership! You ensured all team members had opportunities to contribute.",
        "Good awareness of inclusion. Make sure to engage with all team members equally.",
        "Focus on inclusive practices. Ensure every team member's voice is heard and valued.",
    ])
}
