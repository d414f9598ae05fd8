//! Target word selection
//!
//! Sessions never choose their own target: the service asks a `WordSource`
//! for a word of the requested length.

use super::Vocabulary;
use crate::core::Word;
use crate::error::{GameError, GameResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

/// Supplies target words for new sessions
pub trait WordSource: Send + Sync {
    /// Pick a target of exactly `length` letters
    ///
    /// # Errors
    /// Returns [`GameError::NoWordAvailable`] if the source has no such word.
    fn pick(&self, length: usize) -> GameResult<Word>;
}

/// Uniform random pick from a vocabulary
#[derive(Debug)]
pub struct RandomWordSource {
    vocabulary: Arc<Vocabulary>,
    rng: Mutex<StdRng>,
}

impl RandomWordSource {
    /// Seeded from the operating system
    #[must_use]
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible sequence of picks
    #[must_use]
    pub fn with_seed(vocabulary: Arc<Vocabulary>, seed: u64) -> Self {
        Self {
            vocabulary,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl WordSource for RandomWordSource {
    fn pick(&self, length: usize) -> GameResult<Word> {
        let candidates = self.vocabulary.words_of_length(length);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        candidates
            .choose(&mut *rng)
            .cloned()
            .ok_or(GameError::NoWordAvailable(length))
    }
}

/// One word per UTC day, the same for every session created that day
#[derive(Debug)]
pub struct DailyWordSource {
    vocabulary: Arc<Vocabulary>,
    offset: u64,
}

impl DailyWordSource {
    /// `offset` shifts the whole schedule; different offsets give different daily words
    #[must_use]
    pub const fn new(vocabulary: Arc<Vocabulary>, offset: u64) -> Self {
        Self { vocabulary, offset }
    }

    /// The word scheduled for `day` (days since the Unix epoch)
    ///
    /// # Errors
    /// Returns [`GameError::NoWordAvailable`] if there is no word of `length`.
    pub fn pick_for_day(&self, length: usize, day: u64) -> GameResult<Word> {
        let candidates = self.vocabulary.words_of_length(length);
        if candidates.is_empty() {
            return Err(GameError::NoWordAvailable(length));
        }

        // Knuth multiplicative hash spreads consecutive days across the list
        let slot = day
            .wrapping_add(self.offset)
            .wrapping_mul(2_654_435_761)
            % candidates.len() as u64;
        Ok(candidates[slot as usize].clone())
    }
}

impl WordSource for DailyWordSource {
    fn pick(&self, length: usize) -> GameResult<Word> {
        let day = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs() / SECONDS_PER_DAY);
        self.pick_for_day(length, day)
    }
}

/// Always the same target
#[derive(Debug, Clone)]
pub struct FixedWordSource {
    word: Word,
}

impl FixedWordSource {
    #[must_use]
    pub const fn new(word: Word) -> Self {
        Self { word }
    }
}

impl WordSource for FixedWordSource {
    fn pick(&self, length: usize) -> GameResult<Word> {
        if self.word.len() == length {
            Ok(self.word.clone())
        } else {
            Err(GameError::NoWordAvailable(length))
        }
    }
}
