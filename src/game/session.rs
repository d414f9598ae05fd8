//! Single-game state machine
//!
//! A `Session` owns the hidden target, the append-only attempt log and the
//! aggregate keyboard status. Its only mutation is [`Session::submit_guess`].

use super::SessionId;
use crate::core::{Feedback, KeyboardStatus, Word, evaluate};
use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most guesses any session may be configured with
pub const MAX_ATTEMPTS: usize = 32;

/// Game lifecycle: `Playing` until won or out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// `Won` or `Lost`
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(name)
    }
}

/// One recorded guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    /// 1-based position in the session
    pub ordinal: usize,
    pub guess: Word,
    pub feedback: Feedback,
}

/// Emitted once, on the transition out of `Playing`
///
/// Feeds the statistics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub won: bool,
    pub attempts_used: usize,
}

/// Result of a successful guess submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResult {
    pub attempt: Attempt,
    pub status: GameStatus,
    /// Set only once the game is over
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed_target: Option<Word>,
    /// Set only by the guess that ended the game
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameOutcome>,
}

/// Read-only projection of a session, safe to hand to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub word_length: usize,
    pub max_attempts: usize,
    pub attempts_remaining: usize,
    pub status: GameStatus,
    pub attempts: Vec<Attempt>,
    pub keyboard: KeyboardStatus,
    /// Revealed only when the game is over
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Word>,
}

/// One game in progress or finished
#[derive(Clone)]
pub struct Session {
    id: SessionId,
    target: Word,
    max_attempts: usize,
    attempts: Vec<Attempt>,
    keyboard: KeyboardStatus,
    status: GameStatus,
}

impl Session {
    /// Start a new game against `target`
    ///
    /// The target's length becomes the session's word length.
    ///
    /// # Errors
    /// Returns [`GameError::InvalidConfig`] unless `1 <= max_attempts <= MAX_ATTEMPTS`.
    pub fn new(id: SessionId, target: Word, max_attempts: usize) -> GameResult<Self> {
        if max_attempts == 0 || max_attempts > MAX_ATTEMPTS {
            return Err(GameError::InvalidConfig(format!(
                "max_attempts must be between 1 and {MAX_ATTEMPTS}, got {max_attempts}"
            )));
        }

        Ok(Self {
            id,
            target,
            max_attempts,
            attempts: Vec::new(),
            keyboard: KeyboardStatus::new(),
            status: GameStatus::Playing,
        })
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.target.len()
    }

    #[inline]
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    #[inline]
    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardStatus {
        &self.keyboard
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        self.max_attempts - self.attempts.len()
    }

    /// The target, only once the game is over
    #[must_use]
    pub fn revealed_target(&self) -> Option<&Word> {
        self.status.is_terminal().then_some(&self.target)
    }

    /// Whether `guess` would be accepted right now, without recording it
    ///
    /// Checks run in a fixed order: terminal status, word length, attempt cap.
    /// The cap is checked on its own even though a full log implies a
    /// terminal status.
    ///
    /// # Errors
    /// - [`GameError::SessionTerminal`] if the game is already won or lost
    /// - [`GameError::LengthMismatch`] if the guess length differs from the target's
    /// - [`GameError::AttemptLimitReached`] if `max_attempts` guesses are recorded
    pub fn check_guess(&self, guess: &Word) -> GameResult<()> {
        if self.status.is_terminal() {
            return Err(GameError::SessionTerminal(self.status));
        }
        if guess.len() != self.word_length() {
            return Err(GameError::LengthMismatch {
                expected: self.word_length(),
                actual: guess.len(),
            });
        }
        if self.attempts.len() >= self.max_attempts {
            return Err(GameError::AttemptLimitReached(self.max_attempts));
        }
        Ok(())
    }

    /// Turn raw input into a guess, reporting errors in state-machine order
    ///
    /// A finished session reports `SessionTerminal` whatever the input, and a
    /// wrong letter count is a `LengthMismatch` even when the text would not
    /// parse. Only input of the right length is checked for bad characters.
    ///
    /// # Errors
    /// - [`GameError::SessionTerminal`] if the game is already won or lost
    /// - [`GameError::LengthMismatch`] if `raw` has the wrong number of characters
    /// - [`GameError::InvalidWord`] for characters outside `a..=z` (either case)
    pub fn parse_guess(&self, raw: &str) -> GameResult<Word> {
        if self.status.is_terminal() {
            return Err(GameError::SessionTerminal(self.status));
        }
        let actual = raw.chars().count();
        if actual != self.word_length() {
            return Err(GameError::LengthMismatch {
                expected: self.word_length(),
                actual,
            });
        }
        Ok(Word::parse(raw)?)
    }

    /// Record a guess and advance the state machine
    ///
    /// # Errors
    /// Same as [`Session::check_guess`]; nothing is recorded on error.
    pub fn submit_guess(&mut self, guess: &Word) -> GameResult<SubmitResult> {
        self.check_guess(guess)?;

        let feedback = evaluate(guess, &self.target)?;
        let solved = feedback.is_solved();

        self.keyboard.merge(guess, &feedback);
        let attempt = Attempt {
            ordinal: self.attempts.len() + 1,
            guess: guess.clone(),
            feedback,
        };
        self.attempts.push(attempt.clone());

        self.status = if solved {
            GameStatus::Won
        } else if self.attempts.len() == self.max_attempts {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };

        let outcome = self.status.is_terminal().then(|| GameOutcome {
            won: solved,
            attempts_used: self.attempts.len(),
        });

        Ok(SubmitResult {
            attempt,
            status: self.status,
            revealed_target: self.revealed_target().cloned(),
            outcome,
        })
    }

    /// Snapshot for clients
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            word_length: self.word_length(),
            max_attempts: self.max_attempts,
            attempts_remaining: self.attempts_remaining(),
            status: self.status,
            attempts: self.attempts.clone(),
            keyboard: self.keyboard.clone(),
            target: self.revealed_target().cloned(),
        }
    }
}

// Hand-written so the target never leaks into logs while the game is live
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Session");
        dbg.field("id", &self.id)
            .field("status", &self.status)
            .field("word_length", &self.word_length())
            .field("max_attempts", &self.max_attempts)
            .field("attempts", &self.attempts.len());
        match self.revealed_target() {
            Some(target) => dbg.field("target", target),
            None => dbg.field("target", &"<hidden>"),
        };
        dbg.finish()
    }
}
