//! Player statistics
//!
//! Aggregates terminal [`GameOutcome`]s per user: games played and won,
//! current and best win streak, and how many guesses each win took.

mod store;

pub use store::{load_stats, write_stats};

use crate::game::GameOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User id for callers that don't identify the player
pub const ANONYMOUS_USER: &str = "anonymous";

/// Aggregate results for one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub played: u32,
    pub won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Winning attempt ordinal -> number of wins
    pub distribution: BTreeMap<usize, u32>,
}

impl PlayerStats {
    /// Fold one finished game into the totals
    pub fn record(&mut self, outcome: &GameOutcome) {
        self.played += 1;
        if outcome.won {
            self.won += 1;
            self.current_streak += 1;
            self.max_streak = self.max_streak.max(self.current_streak);
            *self.distribution.entry(outcome.attempts_used).or_insert(0) += 1;
        } else {
            self.current_streak = 0;
        }
    }

    /// Share of games won, 0-100
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.won) / f64::from(self.played) * 100.0
        }
    }

    /// Distribution with every bucket `1..=max_attempts` present
    ///
    /// Buckets beyond `max_attempts` (from games with a larger limit) are kept.
    #[must_use]
    pub fn distribution_filled(&self, max_attempts: usize) -> BTreeMap<usize, u32> {
        let mut filled: BTreeMap<usize, u32> = (1..=max_attempts).map(|n| (n, 0)).collect();
        filled.extend(self.distribution.iter().map(|(&k, &v)| (k, v)));
        filled
    }
}

/// Statistics for every user, keyed by user id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsBook {
    players: BTreeMap<String, PlayerStats>,
}

impl StatsBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, user_id: &str, outcome: &GameOutcome) {
        self.players
            .entry(user_id.to_string())
            .or_default()
            .record(outcome);
    }

    /// Stats for `user_id`; zeroed if the user has never finished a game
    #[must_use]
    pub fn get(&self, user_id: &str) -> PlayerStats {
        self.players.get(user_id).cloned().unwrap_or_default()
    }

    /// Known user ids, sorted
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
