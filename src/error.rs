//! Error types for the game engine and service.
//!
//! Every failure is local to one request: none of them poison a session or
//! the service, and callers can tell each kind apart.

use crate::core::WordError;
use crate::game::{GameStatus, SessionId};
use std::fmt;

/// Failure of an evaluation, session or service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Guess (or target) length disagrees with the session's word length.
    LengthMismatch {
        /// Length the session was created with.
        expected: usize,
        /// Length of the offending word.
        actual: usize,
    },
    /// Guess submitted after the game ended.
    SessionTerminal(GameStatus),
    /// Attempt log already holds the maximum number of attempts.
    AttemptLimitReached(usize),
    /// No session with this id.
    SessionNotFound(SessionId),
    /// Guess contains characters outside `a..=z`, or is empty or too long.
    InvalidWord(WordError),
    /// Guess is well-formed but not in the vocabulary (strict mode only).
    UnknownWord(String),
    /// The word source has nothing of the requested length.
    NoWordAvailable(usize),
    /// Rejected session or service parameters.
    InvalidConfig(String),
}

impl GameError {
    /// Stable machine-readable name, used on the wire.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::SessionTerminal(_) => "session_terminal",
            Self::AttemptLimitReached(_) => "attempt_limit_reached",
            Self::SessionNotFound(_) => "session_not_found",
            Self::InvalidWord(_) => "invalid_word",
            Self::UnknownWord(_) => "unknown_word",
            Self::NoWordAvailable(_) => "no_word_available",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "guess must be {expected} letters, got {actual}")
            }
            Self::SessionTerminal(status) => {
                write!(f, "game is over ({status}); no more guesses accepted")
            }
            Self::AttemptLimitReached(max) => {
                write!(f, "all {max} attempts have been used")
            }
            Self::SessionNotFound(id) => write!(f, "no session with id {id}"),
            Self::InvalidWord(err) => write!(f, "invalid word: {err}"),
            Self::UnknownWord(word) => write!(f, "'{word}' is not in the word list"),
            Self::NoWordAvailable(length) => {
                write!(f, "no {length}-letter words available")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidWord(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WordError> for GameError {
    fn from(err: WordError) -> Self {
        Self::InvalidWord(err)
    }
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
