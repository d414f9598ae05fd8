//! Core domain types for Wordle
//!
//! Words, verdicts, the guess evaluator and the aggregate keyboard status.
//! Everything here is pure: no I/O, no shared state.

mod evaluate;
mod keyboard;
mod verdict;
mod word;

pub use evaluate::evaluate;
pub use keyboard::KeyboardStatus;
pub use verdict::{Feedback, Verdict};
pub use word::{ALPHABET_SIZE, MAX_WORD_LENGTH, Word, WordError};
