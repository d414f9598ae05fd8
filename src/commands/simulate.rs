//! Simulated play
//!
//! Runs many autoplayed games through a `GameService` in parallel and
//! collects win rate and guess distribution.

use crate::core::Word;
use crate::error::GameError;
use crate::game::GameStatus;
use crate::service::GameService;
use crate::solver::Solver;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// User id simulated games are recorded under
pub const SIMULATION_USER: &str = "simulator";

/// Configuration for a simulation run
pub struct SimulationConfig {
    pub games: usize,
    pub word_length: usize,
    pub max_attempts: usize,
    pub show_progress: bool,
}

/// Aggregate results of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    pub games: usize,
    pub won: usize,
    pub lost: usize,
    /// Winning attempt ordinal -> wins
    pub distribution: BTreeMap<usize, usize>,
    pub average_attempts_to_win: f64,
    pub duration: Duration,
    pub games_per_second: f64,
}

impl SimulationResult {
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.won as f64 / self.games as f64 * 100.0
        }
    }
}

/// Play one autoplayed game to completion
///
/// Returns the final status and the number of attempts used.
///
/// # Errors
///
/// Returns an error if the session cannot be created or the solver runs out
/// of consistent guesses.
pub fn play_one(
    service: &GameService,
    solver: &Solver<'_>,
    word_length: usize,
    max_attempts: usize,
) -> Result<(GameStatus, usize), GameError> {
    let (id, mut view) = service.create_session(word_length, max_attempts, SIMULATION_USER)?;
    let mut rng = rand::rng();

    while view.status == GameStatus::Playing {
        let guess: &Word = solver
            .next_guess(word_length, &view.attempts, &mut rng)
            .ok_or(GameError::NoWordAvailable(word_length))?;
        service.submit_guess(id, guess.text())?;
        view = service.get_session(id)?;
    }

    service.remove_session(id);
    Ok((view.status, view.attempts.len()))
}

/// Run `config.games` games in parallel
#[must_use]
pub fn run_simulation(
    service: &GameService,
    words: &[Word],
    config: &SimulationConfig,
) -> SimulationResult {
    let solver = Solver::new(words);
    let pb = if config.show_progress {
        ProgressBar::new(config.games as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let outcomes: Vec<(GameStatus, usize)> = (0..config.games)
        .into_par_iter()
        .filter_map(|_| {
            let outcome = play_one(service, &solver, config.word_length, config.max_attempts);
            pb.inc(1);
            outcome
                .inspect_err(|err| warn!("simulated game aborted: {err}"))
                .ok()
        })
        .collect();
    pb.finish_with_message("Complete!");
    let duration = start.elapsed();

    let mut distribution: BTreeMap<usize, usize> = BTreeMap::new();
    let mut won = 0;
    let mut winning_attempts = 0;
    for &(status, attempts) in &outcomes {
        if status == GameStatus::Won {
            won += 1;
            winning_attempts += attempts;
            *distribution.entry(attempts).or_insert(0) += 1;
        }
    }

    let games = outcomes.len();
    SimulationResult {
        games,
        won,
        lost: games - won,
        distribution,
        average_attempts_to_win: if won == 0 {
            0.0
        } else {
            winning_attempts as f64 / won as f64
        },
        duration,
        games_per_second: games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceConfig;
    use crate::wordlists::loader::words_from_slice;
    use crate::wordlists::{RandomWordSource, Vocabulary};
    use std::sync::Arc;

    fn setup() -> (GameService, Vec<Word>) {
        let words = words_from_slice(&["crane", "crate", "grate", "irate", "slate", "plate"]);
        let vocabulary = Arc::new(Vocabulary::new(words.clone()));
        let service = GameService::new(
            Box::new(RandomWordSource::with_seed(Arc::clone(&vocabulary), 3)),
            vocabulary,
            ServiceConfig::default(),
        );
        (service, words)
    }

    #[test]
    fn play_one_finishes_game() {
        let (service, words) = setup();
        let solver = Solver::new(&words);
        let (status, attempts) = play_one(&service, &solver, 5, 6).unwrap();

        assert!(status.is_terminal());
        assert!((1..=6).contains(&attempts));
        assert_eq!(service.session_count(), 0);
    }

    #[test]
    fn simulation_accounts_for_every_game() {
        let (service, words) = setup();
        let config = SimulationConfig {
            games: 40,
            word_length: 5,
            max_attempts: 6,
            show_progress: false,
        };
        let result = run_simulation(&service, &words, &config);

        assert_eq!(result.games, 40);
        assert_eq!(result.won + result.lost, 40);
        // Six candidates, six attempts: the consistent-candidate player can't lose
        assert_eq!(result.won, 40);
        assert_eq!(result.distribution.values().sum::<usize>(), 40);
        assert!(result.average_attempts_to_win >= 1.0);

        let stats = service.aggregate_stats(SIMULATION_USER);
        assert_eq!(stats.played, 40);
        assert_eq!(stats.won, 40);
    }

    #[test]
    fn missing_length_aborts_games() {
        let (service, words) = setup();
        let config = SimulationConfig {
            games: 3,
            word_length: 4,
            max_attempts: 6,
            show_progress: false,
        };
        let result = run_simulation(&service, &words, &config);
        assert_eq!(result.games, 0);
        assert!(result.win_percentage().abs() < f64::EPSILON);
    }
}
