//! Aggregate per-letter status across a session's attempts

use super::word::{ALPHABET_SIZE, letter_index};
use super::{Feedback, Verdict, Word};
use serde::{Serialize, Serializer};

/// Best verdict ever observed for each letter
///
/// Merging is upgrade-only: a letter seen `Correct` never falls back to
/// `Present` or `Absent` because of a later attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardStatus {
    letters: [Option<Verdict>; ALPHABET_SIZE],
}

impl KeyboardStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one attempt's verdicts into the aggregate
    ///
    /// `guess` and `feedback` must be index-aligned.
    pub fn merge(&mut self, guess: &Word, feedback: &Feedback) {
        debug_assert_eq!(guess.len(), feedback.len());

        for (&letter, &verdict) in guess.letters().iter().zip(feedback.verdicts()) {
            let slot = &mut self.letters[letter_index(letter)];
            *slot = Some(slot.map_or(verdict, |seen| seen.best(verdict)));
        }
    }

    /// Status of a letter, `None` if it has not been guessed yet
    ///
    /// Accepts either case.
    #[must_use]
    pub fn get(&self, letter: char) -> Option<Verdict> {
        let letter = letter.to_ascii_lowercase();
        if letter.is_ascii_lowercase() {
            self.letters[letter_index(letter as u8)]
        } else {
            None
        }
    }

    /// Guessed letters in alphabetical order with their best verdict
    pub fn iter(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        (b'a'..=b'z')
            .zip(&self.letters)
            .filter_map(|(letter, status)| status.map(|v| (char::from(letter), v)))
    }

    /// Number of distinct letters guessed so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for KeyboardStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluate;
    use Verdict::{Absent, Correct, Present};

    fn merge_guess(keyboard: &mut KeyboardStatus, guess: &str, target: &str) {
        let guess = Word::parse(guess).unwrap();
        let target = Word::parse(target).unwrap();
        let feedback = evaluate(&guess, &target).unwrap();
        keyboard.merge(&guess, &feedback);
    }

    #[test]
    fn empty_keyboard() {
        let keyboard = KeyboardStatus::new();
        assert!(keyboard.is_empty());
        assert_eq!(keyboard.get('a'), None);
    }

    #[test]
    fn records_each_letter() {
        let mut keyboard = KeyboardStatus::new();
        merge_guess(&mut keyboard, "slate", "crane");

        assert_eq!(keyboard.get('s'), Some(Absent));
        assert_eq!(keyboard.get('a'), Some(Correct));
        assert_eq!(keyboard.get('E'), Some(Correct));
        assert_eq!(keyboard.get('c'), None);
        assert_eq!(keyboard.len(), 5);
    }

    #[test]
    fn upgrade_from_absent_to_present() {
        let mut keyboard = KeyboardStatus::new();
        // EXTRA has one E: the first E is present, the surplus E's are absent
        merge_guess(&mut keyboard, "geese", "extra");
        assert_eq!(keyboard.get('e'), Some(Present));

        let mut keyboard = KeyboardStatus::new();
        merge_guess(&mut keyboard, "abcde", "xyzwv");
        assert_eq!(keyboard.get('a'), Some(Absent));
        merge_guess(&mut keyboard, "fghia", "axyzw");
        assert_eq!(keyboard.get('a'), Some(Present));
    }

    #[test]
    fn never_downgrades() {
        let mut keyboard = KeyboardStatus::new();
        merge_guess(&mut keyboard, "crane", "crane");
        assert_eq!(keyboard.get('c'), Some(Correct));

        merge_guess(&mut keyboard, "xxxxc", "crane");
        assert_eq!(keyboard.get('c'), Some(Correct));

        merge_guess(&mut keyboard, "zzzzz", "crane");
        assert_eq!(keyboard.get('z'), Some(Absent));
    }

    #[test]
    fn same_letter_twice_in_one_guess_keeps_best() {
        let mut keyboard = KeyboardStatus::new();
        // Second E is exact and claims the only E, so the first E is absent
        merge_guess(&mut keyboard, "eexxx", "xexxx");
        assert_eq!(keyboard.get('e'), Some(Correct));

        // First E present, surplus second E absent
        let mut keyboard = KeyboardStatus::new();
        merge_guess(&mut keyboard, "eexxx", "xxxxe");
        assert_eq!(keyboard.get('e'), Some(Present));
    }

    #[test]
    fn serializes_alphabetically() {
        let mut keyboard = KeyboardStatus::new();
        merge_guess(&mut keyboard, "slate", "crane");
        let json = serde_json::to_string(&keyboard).unwrap();
        assert_eq!(
            json,
            r#"{"a":"correct","e":"correct","l":"absent","s":"absent","t":"absent"}"#
        );
    }
}
