//! Domain models for leadsim.
//!
//! # Core Concepts
//!
//! ## Static Data
//!
//! - [`Task`]: A delegable unit of work from the fixed catalog. Shared read-only.
//!
//! ## Session-Owned State
//!
//! - [`Session`]: Aggregate root for one run of the exercise. Owns the team,
//!   the action history and the phase clock.
//! - [`TeamMember`]: One of the three scripted characters. Mood, workload and
//!   assigned tasks change as the user acts; everything else is fixed.
//! - [`SimulationAction`]: A single user move. Recorded in the session history
//!   and never modified afterwards.
//!
//! ## Derived Values
//!
//! - [`ActionResponse`]: Outcome of resolving one action.
//! - [`CompetencyScore`]: One of six assessments computed at completion.

mod action;
mod member;
mod score;
mod session;
mod task;

pub use action::*;
pub use member::*;
pub use score::*;
pub use session::*;
pub use task::*;
