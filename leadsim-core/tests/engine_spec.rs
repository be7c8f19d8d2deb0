use chrono::{Duration, Utc};
use leadsim_core::engine::submit_action;
use leadsim_core::models::*;
use leadsim_core::scoring::{score_session, session_results};
use leadsim_core::{debug, phase, resolver, roster, SimError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use speculate2::speculate;
use uuid::Uuid;

speculate! {
    before {
        let start = Utc::now();
        let mut session = Session::new(Uuid::new_v4(), start);
        let mut rng = StdRng::seed_from_u64(2024);
    }

    describe "phase progression" {
        it "only ever moves forward one phase at a time" {
            let mut seen = vec![session.phase];
            let mut now = start;
            for _ in 0..20 {
                now = now + Duration::minutes(1);
                submit_action(&mut session, SimulationAction::question("alex"), &mut rng, now);
                if *seen.last().unwrap() != session.phase {
                    seen.push(session.phase);
                }
            }

            assert_eq!(
                seen,
                vec![Phase::MeetTeam, Phase::DelegateTasks, Phase::NavigateConflicts, Phase::Completed]
            );
        }

        it "does not advance without an access" {
            let idle = start + Duration::minutes(45);
            assert_eq!(session.phase, Phase::MeetTeam);

            assert_eq!(phase::advance(&mut session, idle), Some(Phase::DelegateTasks));
        }
    }

    describe "delegation" {
        it "adds exactly the task hours and one task entry" {
            for task in roster::task_catalog() {
                let team = roster::initial_team();
                for (id, before) in &team {
                    let action = SimulationAction::delegate(id.clone(), task.id.clone());
                    let response = resolver::resolve(&team, &action, &mut rng);
                    let after = &response.updated_team_state[id];

                    assert_eq!(after.workload, before.workload + task.estimated_hours as i32);
                    assert_eq!(after.current_tasks.len(), before.current_tasks.len() + 1);
                    assert_eq!(after.current_tasks.last(), Some(&task.name));
                }
            }
        }

        it "makes alex happy with the backend api at 42 hours" {
            let response = submit_action(
                &mut session,
                SimulationAction::delegate("alex", "backend_api"),
                &mut rng,
                start,
            );

            assert_eq!(session.team_members["alex"].workload, 42);
            assert_eq!(session.team_members["alex"].mood, Mood::Happy);
            assert_eq!(response.mood_change, Some(Mood::Happy));
        }

        it "frustrates an already busy jordan with the backend api" {
            session.team_members.get_mut("jordan").unwrap().workload = 41;

            let response = submit_action(
                &mut session,
                SimulationAction::delegate("jordan", "backend_api"),
                &mut rng,
                start,
            );

            assert_eq!(session.team_members["jordan"].workload, 53);
            assert_eq!(session.team_members["jordan"].mood, Mood::Frustrated);
            assert!(response.consequences.iter().any(|c| c.contains("skill mismatch")));
            assert!(!response.consequences.iter().any(|c| c.contains("overloaded")));
        }
    }

    describe "messages" {
        it "lifts a frustrated member only to neutral" {
            session.team_members.get_mut("sam").unwrap().mood = Mood::Frustrated;

            submit_action(
                &mut session,
                SimulationAction::message("sam", "thank you so much, great work!"),
                &mut rng,
                start,
            );

            assert_eq!(session.team_members["sam"].mood, Mood::Neutral);
        }
    }

    describe "results" {
        it "are refused before completion" {
            debug::force_phase(&mut session, "navigate_conflicts", &mut rng, start).unwrap();

            let err = session_results(&session, start).unwrap_err();
            assert_eq!(err, SimError::ResultsNotReady(Phase::NavigateConflicts));
            assert_eq!(err.code(), "results_not_ready");
        }

        it "contain six bounded scores once completed" {
            debug::force_phase(&mut session, "completed", &mut rng, start + Duration::minutes(10)).unwrap();

            let results = session_results(&session, start + Duration::minutes(11)).unwrap();
            assert_eq!(results.competency_scores.len(), 6);
            assert!(results.competency_scores.values().all(|s| s.score <= 100));
            assert_eq!(results.actions_taken, 6);
        }

        it "are identical when scored twice" {
            submit_action(&mut session, SimulationAction::conflict("address_both"), &mut rng, start);
            debug::force_phase(&mut session, "completed", &mut rng, start + Duration::minutes(9)).unwrap();

            let first = score_session(&session).unwrap();
            let second = score_session(&session).unwrap();
            assert_eq!(first, second);
        }
    }
}
