//! Core of the leadsim team-leadership exercise.
//!
//! A user plays a manager working with three scripted team members across
//! three timed phases. This crate holds the pure parts: the roster and task
//! catalog, action resolution, phase progression and competency scoring.
//! Time and randomness are always passed in by the caller.

pub mod debug;
pub mod engine;
pub mod error;
pub mod models;
pub mod phase;
pub mod resolver;
pub mod roster;
pub mod scoring;

pub use error::SimError;
