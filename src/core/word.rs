//! Word representation
//!
//! A Word stores a case-normalized sequence of ASCII letters. Length is not
//! fixed at the type level: a session fixes it when the target is chosen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest word any session may be configured with
pub const MAX_WORD_LENGTH: usize = 16;

/// Number of distinct letters in the accepted alphabet (`a..=z`)
pub const ALPHABET_SIZE: usize = 26;

/// A lowercase ASCII word
///
/// Comparison is case-insensitive by construction: input is checked for ASCII
/// letters, then lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    Empty,
    TooLong(usize),
    InvalidCharacter(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Word must not be empty"),
            Self::TooLong(len) => {
                write!(f, "Word must be at most {MAX_WORD_LENGTH} letters, got {len}")
            }
            Self::InvalidCharacter(ch) => {
                write!(f, "Word may only contain letters a-z, found {ch:?}")
            }
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Parse a word from a string
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The string is empty
    /// - It is longer than [`MAX_WORD_LENGTH`]
    /// - It contains anything other than ASCII letters
    ///
    /// # Examples
    /// ```
    /// use wordle_game::core::Word;
    ///
    /// let word = Word::parse("CRANE").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::parse("sh0rt").is_err());
    /// ```
    pub fn parse(text: impl Into<String>) -> Result<Self, WordError> {
        let mut text: String = text.into();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if let Some(bad) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        // Only ASCII past this point, so bytes == chars
        if text.len() > MAX_WORD_LENGTH {
            return Err(WordError::TooLong(text.len()));
        }

        text.make_ascii_lowercase();
        Ok(Self { text })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word's letters as bytes (`b'a'..=b'z'`)
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a parsed word; present for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the letter at a specific position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> u8 {
        self.letters()[position]
    }

    /// Count of each letter, indexed by `letter - b'a'`
    ///
    /// Used by the evaluator as the "remaining" pool for duplicate handling.
    #[must_use]
    pub fn letter_counts(&self) -> [u8; ALPHABET_SIZE] {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &ch in self.letters() {
            counts[letter_index(ch)] += 1;
        }
        counts
    }
}

/// Index of a lowercase ASCII letter in a 26-slot table
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    usize::from(letter - b'a')
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(text)
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
