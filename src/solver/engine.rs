//! Consistent-candidate autoplayer
//!
//! Always guesses a word that could still be the target given every
//! verdict seen so far. Used to drive simulated games through the service.

use crate::core::{Word, evaluate};
use crate::game::Attempt;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Guess picker over a fixed word list
pub struct Solver<'a> {
    words: &'a [Word],
}

impl<'a> Solver<'a> {
    /// `words` is both the guess pool and the candidate pool
    #[must_use]
    pub const fn new(words: &'a [Word]) -> Self {
        Self { words }
    }

    /// Words that would have produced every recorded verdict sequence
    ///
    /// Words of a different length than the attempts are never candidates.
    #[must_use]
    pub fn candidates(&self, history: &[Attempt]) -> Vec<&'a Word> {
        self.words
            .iter()
            .filter(|&candidate| {
                history.iter().all(|attempt| {
                    evaluate(&attempt.guess, candidate)
                        .is_ok_and(|feedback| feedback == attempt.feedback)
                })
            })
            .collect()
    }

    /// Random pick among the remaining candidates of `length` letters
    ///
    /// Returns None if no word is consistent with the history.
    pub fn next_guess<R: Rng + ?Sized>(
        &self,
        length: usize,
        history: &[Attempt],
        rng: &mut R,
    ) -> Option<&'a Word> {
        let candidates: Vec<&'a Word> = self
            .candidates(history)
            .into_iter()
            .filter(|w| w.len() == length)
            .collect();
        candidates.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Session, SessionId};
    use crate::wordlists::loader::words_from_slice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words() -> Vec<Word> {
        words_from_slice(&["crane", "crate", "grate", "irate", "slate", "cat"])
    }

    fn play(session: &mut Session, guess: &str) {
        session.submit_guess(&Word::parse(guess).unwrap()).unwrap();
    }

    #[test]
    fn no_history_keeps_everything() {
        let words = words();
        let solver = Solver::new(&words);
        assert_eq!(solver.candidates(&[]).len(), words.len());
    }

    #[test]
    fn history_filters_candidates() {
        let words = words();
        let solver = Solver::new(&words);
        let mut session = Session::new(SessionId::new(), Word::parse("grate").unwrap(), 6).unwrap();
        play(&mut session, "crate");

        let remaining: Vec<&str> = solver
            .candidates(session.attempts())
            .into_iter()
            .map(Word::text)
            .collect();
        // Only words matching -GGGG against CRATE, the target among them
        assert_eq!(remaining, ["grate", "irate"]);
    }

    #[test]
    fn next_guess_respects_length_and_history() {
        let words = words();
        let solver = Solver::new(&words);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..10 {
            let guess = solver.next_guess(3, &[], &mut rng).unwrap();
            assert_eq!(guess.text(), "cat");
        }
        assert!(solver.next_guess(7, &[], &mut rng).is_none());
    }

    #[test]
    fn autoplay_always_finds_target_in_small_list() {
        let words = words();
        let solver = Solver::new(&words);
        let mut rng = StdRng::seed_from_u64(99);

        for target in ["crane", "crate", "grate", "irate", "slate"] {
            let mut session =
                Session::new(SessionId::new(), Word::parse(target).unwrap(), 6).unwrap();
            while !session.status().is_terminal() {
                let guess = solver
                    .next_guess(5, session.attempts(), &mut rng)
                    .unwrap()
                    .clone();
                session.submit_guess(&guess).unwrap();
            }
            assert_eq!(session.status(), crate::game::GameStatus::Won, "{target}");
        }
    }
}
