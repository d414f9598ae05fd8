//! Automatic players
//!
//! Picks guesses consistent with a session's history. Used by the simulate
//! command to exercise the service with many concurrent games.

mod engine;

pub use engine::Solver;
