//! The fixed cast and task catalog.
//!
//! Everything here is static content. Each call builds a fresh copy so a new
//! session never shares mutable state with another one.

use std::collections::BTreeMap;

use crate::models::*;

/// The two members whose tension `address_conflict` resolves.
pub const CONFLICT_PAIR: (&str, &str) = ("sam", "jordan");

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn traits(items: &[(&str, u8)]) -> BTreeMap<String, u8> {
    items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn member(
    name: &str,
    role: &str,
    description: &str,
    workload: i32,
    skills: &[&str],
    personality: &[(&str, u8)],
    triggers: &[&str],
) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        description: description.to_string(),
        mood: Mood::Neutral,
        workload,
        skills: strings(skills),
        personality_traits: traits(personality),
        trigger_points: strings(triggers),
        current_tasks: Vec::new(),
    }
}

/// The three team members in their starting state.
pub fn initial_team() -> Team {
    let mut team = Team::new();
    team.insert(
        "alex".to_string(),
        member(
            "Alex",
            "Developer",
            "Brilliant but disorganized",
            30,
            &["Python", "JavaScript", "Problem Solving", "Innovation"],
            &[
                ("creativity", 9),
                ("organization", 3),
                ("technical_skill", 8),
                ("communication", 5),
                ("stress_tolerance", 6),
            ],
            &["micromanagement", "tight_deadlines", "unclear_requirements"],
        ),
    );
    team.insert(
        "jordan".to_string(),
        member(
            "Jordan",
            "Designer",
            "Detail-oriented but anxious",
            25,
            &["UI/UX Design", "Attention to Detail", "User Research", "Prototyping"],
            &[
                ("creativity", 7),
                ("organization", 8),
                ("attention_to_detail", 9),
                ("confidence", 4),
                ("stress_tolerance", 5),
            ],
            &["public_criticism", "rushed_feedback", "unclear_expectations"],
        ),
    );
    team.insert(
        "sam".to_string(),
        member(
            "Sam",
            "Marketing",
            "Driven but impatient",
            40,
            &["Marketing Strategy", "Communication", "Leadership", "Results Focus"],
            &[
                ("drive", 9),
                ("patience", 3),
                ("communication", 8),
                ("results_focus", 9),
                ("collaboration", 6),
            ],
            &["long_meetings", "indecision", "slow_progress"],
        ),
    );
    team
}

fn task(
    id: &str,
    name: &str,
    description: &str,
    estimated_hours: u32,
    skills_required: &[&str],
    urgency: Urgency,
    best_fit: &str,
) -> Task {
    Task {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        estimated_hours,
        skills_required: strings(skills_required),
        urgency,
        best_fit: best_fit.to_string(),
    }
}

/// The five tasks available for delegation.
pub fn task_catalog() -> Vec<Task> {
    vec![
        task(
            "create_mockups",
            "Create UI Mockups",
            "Design initial user interface mockups for the new feature",
            8,
            &["UI/UX Design", "Prototyping"],
            Urgency::Medium,
            "jordan",
        ),
        task(
            "backend_api",
            "Develop Backend API",
            "Build the REST API endpoints for data management",
            12,
            &["Python", "API Development"],
            Urgency::High,
            "alex",
        ),
        task(
            "market_research",
            "Conduct Market Research",
            "Research competitor features and user needs",
            6,
            &["Marketing Strategy", "User Research"],
            Urgency::Low,
            "sam",
        ),
        task(
            "user_testing",
            "Plan User Testing",
            "Design and coordinate user testing sessions",
            4,
            &["User Research", "Communication"],
            Urgency::Medium,
            "jordan",
        ),
        task(
            "integration_testing",
            "Integration Testing",
            "Test API integration with frontend components",
            6,
            &["JavaScript", "Problem Solving"],
            Urgency::High,
            "alex",
        ),
    ]
}

pub fn find_task(id: &str) -> Option<Task> {
    task_catalog().into_iter().find(|t| t.id == id)
}

const FALLBACK_ANSWER: &str = "I'll need to think about that.";

/// Canned answers a member gives when asked a question.
pub fn canned_answers(member_id: &str) -> &'static [&'static str] {
    match member_id {
        "alex" => &[
            "I think we should focus on the technical architecture first.",
            "I've been working on some ideas - want to see my sketches?",
            "This reminds me of a similar project I worked on last year.",
        ],
        "jordan" => &[
            "I'd like to do some user research before we finalize the design.",
            "I'm a bit worried about the timeline - can we discuss the priorities?",
            "I want to make sure we get the details right.",
        ],
        "sam" => &[
            "We need to move fast on this - the market window is closing.",
            "What's our go-to-market strategy for this feature?",
            "I can help coordinate with the stakeholders.",
        ],
        _ => &[FALLBACK_ANSWER],
    }
}
