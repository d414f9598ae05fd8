//! Wordle Game
//!
//! A Wordle game engine: two-pass guess evaluation with duplicate-letter
//! accounting, a per-session state machine, a thread-safe session service
//! and per-player statistics.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use wordle_game::core::Word;
//! use wordle_game::game::GameStatus;
//! use wordle_game::service::{GameService, ServiceConfig};
//! use wordle_game::wordlists::{FixedWordSource, Vocabulary};
//!
//! let service = GameService::new(
//!     Box::new(FixedWordSource::new(Word::parse("crane").unwrap())),
//!     Arc::new(Vocabulary::embedded()),
//!     ServiceConfig::default(),
//! );
//!
//! let (id, _view) = service.create_session(5, 6, "alice").unwrap();
//! let result = service.submit_guess(id, "slate").unwrap();
//! println!("{}", result.attempt.feedback.to_emoji());
//!
//! let result = service.submit_guess(id, "crane").unwrap();
//! assert_eq!(result.status, GameStatus::Won);
//! assert_eq!(service.aggregate_stats("alice").won, 1);
//! ```

// Core domain types and the evaluator
pub mod core;

// Session state machine
pub mod game;

// Error types
pub mod error;

// Word lists and target selection
pub mod wordlists;

// Player statistics
pub mod stats;

// Session store
pub mod service;

// Configuration file
pub mod config;

// Tracing setup
pub mod logging;

// JSON-lines protocol
pub mod protocol;

// Autoplayer for simulations
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
