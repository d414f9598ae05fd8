//! Command implementations

pub mod evaluate;
pub mod serve;
pub mod simple;
pub mod simulate;

pub use evaluate::{EvaluationResult, evaluate_words};
pub use serve::run_serve;
pub use simple::run_simple;
pub use simulate::{SimulationConfig, SimulationResult, run_simulation};
