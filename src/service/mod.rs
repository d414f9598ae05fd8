//! Session store and the four external operations
//!
//! `GameService` owns every live session behind its own mutex, so a guess is
//! checked, evaluated and applied as one step per session while different
//! sessions proceed in parallel. Finished games are folded into the
//! per-user [`StatsBook`] after the session lock is released.

use crate::core::MAX_WORD_LENGTH;
use crate::error::{GameError, GameResult};
use crate::game::{Session, SessionId, SessionView, SubmitResult};
use crate::stats::{PlayerStats, StatsBook};
use crate::wordlists::{Vocabulary, WordSource};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Service-wide policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Reject guesses that are not in the vocabulary
    pub strict_vocabulary: bool,
    pub default_word_length: usize,
    pub default_max_attempts: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            strict_vocabulary: false,
            default_word_length: 5,
            default_max_attempts: 6,
        }
    }
}

struct SessionSlot {
    user_id: String,
    session: Mutex<Session>,
}

/// Keyed store of sessions plus the statistics collaborator
pub struct GameService {
    sessions: RwLock<FxHashMap<SessionId, Arc<SessionSlot>>>,
    source: Box<dyn WordSource>,
    vocabulary: Arc<Vocabulary>,
    stats: Mutex<StatsBook>,
    config: ServiceConfig,
}

impl GameService {
    #[must_use]
    pub fn new(
        source: Box<dyn WordSource>,
        vocabulary: Arc<Vocabulary>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            sessions: RwLock::new(FxHashMap::default()),
            source,
            vocabulary,
            stats: Mutex::new(StatsBook::new()),
            config,
        }
    }

    /// Start from previously persisted statistics
    #[must_use]
    pub fn with_stats(mut self, stats: StatsBook) -> Self {
        self.stats = Mutex::new(stats);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Create a session with a target from the word source
    ///
    /// # Errors
    /// - [`GameError::InvalidConfig`] for a zero or oversized word length, or zero attempts
    /// - [`GameError::NoWordAvailable`] if the source has no word of that length
    pub fn create_session(
        &self,
        word_length: usize,
        max_attempts: usize,
        user_id: &str,
    ) -> GameResult<(SessionId, SessionView)> {
        if word_length == 0 || word_length > MAX_WORD_LENGTH {
            return Err(GameError::InvalidConfig(format!(
                "word_length must be between 1 and {MAX_WORD_LENGTH}, got {word_length}"
            )));
        }

        let target = self.source.pick(word_length)?;
        let id = SessionId::new();
        let session = Session::new(id, target, max_attempts)?;
        let view = session.view();

        let slot = Arc::new(SessionSlot {
            user_id: user_id.to_string(),
            session: Mutex::new(session),
        });
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, slot);

        info!(session = %id, user = user_id, word_length, max_attempts, "session created");
        Ok((id, view))
    }

    /// Create a session with the configured defaults
    ///
    /// # Errors
    /// Same as [`GameService::create_session`].
    pub fn create_default_session(&self, user_id: &str) -> GameResult<(SessionId, SessionView)> {
        self.create_session(
            self.config.default_word_length,
            self.config.default_max_attempts,
            user_id,
        )
    }

    /// Current view of a session
    ///
    /// # Errors
    /// Returns [`GameError::SessionNotFound`] for an unknown id.
    pub fn get_session(&self, id: SessionId) -> GameResult<SessionView> {
        let slot = self.slot(id)?;
        Ok(lock(&slot.session).view())
    }

    /// Parse, validate and record a guess
    ///
    /// # Errors
    /// - [`GameError::SessionNotFound`] for an unknown id
    /// - any error from [`Session::parse_guess`], checked in that order
    /// - [`GameError::UnknownWord`] in strict mode, for words outside the vocabulary
    /// - any error from [`Session::submit_guess`]
    pub fn submit_guess(&self, id: SessionId, raw_guess: &str) -> GameResult<SubmitResult> {
        let slot = self.slot(id)?;

        let result = {
            let mut session = lock(&slot.session);
            let guess = session.parse_guess(raw_guess.trim())?;
            session.check_guess(&guess)?;
            if self.config.strict_vocabulary && !self.vocabulary.contains(&guess) {
                return Err(GameError::UnknownWord(guess.text().to_string()));
            }
            session.submit_guess(&guess)?
        };

        debug!(
            session = %id,
            ordinal = result.attempt.ordinal,
            feedback = %result.attempt.feedback,
            status = %result.status,
            "guess recorded"
        );

        if let Some(outcome) = result.outcome {
            info!(
                session = %id,
                user = %slot.user_id,
                won = outcome.won,
                attempts_used = outcome.attempts_used,
                "game over"
            );
            lock(&self.stats).record(&slot.user_id, &outcome);
        }

        Ok(result)
    }

    /// Aggregate statistics for a user
    #[must_use]
    pub fn aggregate_stats(&self, user_id: &str) -> PlayerStats {
        lock(&self.stats).get(user_id)
    }

    /// Copy of every user's statistics, for persistence
    #[must_use]
    pub fn stats_snapshot(&self) -> StatsBook {
        lock(&self.stats).clone()
    }

    /// Drop a session; returns whether it existed
    pub fn remove_session(&self, id: SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            debug!(session = %id, "session removed");
        }
        removed
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn slot(&self, id: SessionId) -> GameResult<Arc<SessionSlot>> {
        let slot = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned();
        slot.ok_or_else(|| {
            warn!(session = %id, "unknown session");
            GameError::SessionNotFound(id)
        })
    }
}

// A panic mid-update can't leave a session half-written: every mutation
// happens after all checks, so the data is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
