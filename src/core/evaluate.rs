//! Guess evaluation
//!
//! Pure function from (guess, target) to the verdict for each position.

use super::word::{ALPHABET_SIZE, letter_index};
use super::{Feedback, Verdict, Word};
use crate::error::GameError;

/// Evaluate `guess` against `target`
///
/// Implements Wordle's feedback rules, including duplicate letters.
///
/// # Algorithm
/// 1. First pass: mark exact matches `Correct` and remove them from the
///    target's letter pool
/// 2. Second pass, left to right: mark `Present` while the pool still holds
///    that letter, otherwise `Absent`
///
/// Surplus copies of a letter are therefore credited leftmost first.
///
/// # Errors
/// Returns [`GameError::LengthMismatch`] if the words differ in length.
///
/// # Examples
/// ```
/// use wordle_game::core::{Verdict, Word, evaluate};
///
/// let guess = Word::parse("slate").unwrap();
/// let target = Word::parse("crane").unwrap();
/// let feedback = evaluate(&guess, &target).unwrap();
///
/// use Verdict::{Absent, Correct};
/// assert_eq!(feedback.verdicts(), &[Absent, Absent, Correct, Absent, Correct]);
/// ```
pub fn evaluate(guess: &Word, target: &Word) -> Result<Feedback, GameError> {
    if guess.len() != target.len() {
        return Err(GameError::LengthMismatch {
            expected: target.len(),
            actual: guess.len(),
        });
    }

    let guess_letters = guess.letters();
    let target_letters = target.letters();
    let mut result = vec![Verdict::Absent; guess_letters.len()];
    let mut remaining: [u8; ALPHABET_SIZE] = target.letter_counts();

    // First pass: exact positions
    for (i, (&g, &t)) in guess_letters.iter().zip(target_letters).enumerate() {
        if g == t {
            result[i] = Verdict::Correct;
            remaining[letter_index(g)] -= 1;
        }
    }

    // Second pass: wrong position, letter still available
    for (verdict, &g) in result.iter_mut().zip(guess_letters) {
        if *verdict == Verdict::Correct {
            continue;
        }
        let pool = &mut remaining[letter_index(g)];
        if *pool > 0 {
            *verdict = Verdict::Present;
            *pool -= 1;
        }
    }

    Ok(Feedback::from_verdicts(result))
}
