//! One-off evaluation of a guess against a target

use crate::core::{Feedback, Word, evaluate};
use crate::error::GameError;

/// Result of evaluating a single guess
pub struct EvaluationResult {
    pub guess: Word,
    pub target: Word,
    pub feedback: Feedback,
}

impl EvaluationResult {
    #[must_use]
    pub fn solved(&self) -> bool {
        self.feedback.is_solved()
    }
}

/// Parse both words and evaluate `guess` against `target`
///
/// # Errors
///
/// Returns an error if either word is invalid or their lengths differ.
pub fn evaluate_words(guess: &str, target: &str) -> Result<EvaluationResult, GameError> {
    let guess = Word::parse(guess.trim())?;
    let target = Word::parse(target.trim())?;
    let feedback = evaluate(&guess, &target)?;

    Ok(EvaluationResult {
        guess,
        target,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_words_reports_feedback() {
        let result = evaluate_words("slate", "CRANE").unwrap();
        assert_eq!(result.feedback.to_string(), "--G-G");
        assert!(!result.solved());
        assert_eq!(result.target.text(), "crane");
    }

    #[test]
    fn evaluate_words_solved() {
        assert!(evaluate_words("crane", "crane").unwrap().solved());
    }

    #[test]
    fn evaluate_words_errors() {
        assert_eq!(
            evaluate_words("cr4ne", "crane").err().map(|e| e.kind()),
            Some("invalid_word")
        );
        assert_eq!(
            evaluate_words("cranes", "crane").err().map(|e| e.kind()),
            Some("length_mismatch")
        );
    }
}
