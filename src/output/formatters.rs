//! Formatting utilities for terminal output

use crate::core::{Feedback, KeyboardStatus, Verdict, Word};
use colored::{ColoredString, Colorize};

/// Keyboard layout used by the letter-status display
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// One letter as a colored tile
#[must_use]
pub fn tile(letter: char, verdict: Verdict) -> ColoredString {
    let text = format!(" {} ", letter.to_ascii_uppercase());
    match verdict {
        Verdict::Correct => text.black().on_green().bold(),
        Verdict::Present => text.black().on_yellow().bold(),
        Verdict::Absent => text.white().on_bright_black(),
    }
}

/// A scored guess as a row of colored tiles
#[must_use]
pub fn guess_tiles(guess: &Word, feedback: &Feedback) -> String {
    guess
        .text()
        .chars()
        .zip(feedback.verdicts())
        .map(|(letter, &verdict)| tile(letter, verdict).to_string())
        .collect()
}

/// Placeholder row for an unused attempt
#[must_use]
pub fn empty_row(word_length: usize) -> String {
    " _ ".repeat(word_length)
}

/// A guess with its verdict symbols, e.g. `CRANE  -Y-GG`
#[must_use]
pub fn plain_row(guess: &Word, feedback: &Feedback) -> String {
    format!("{}  {feedback}", guess.text().to_uppercase())
}

/// One keyboard row with each letter colored by its best verdict
#[must_use]
pub fn keyboard_row(keyboard: &KeyboardStatus, row: &str) -> String {
    row.chars()
        .map(|letter| {
            keyboard.get(letter).map_or_else(
                || format!(" {} ", letter.to_ascii_uppercase()),
                |verdict| tile(letter, verdict).to_string(),
            )
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluate;

    fn scored(guess: &str, target: &str) -> (Word, Feedback) {
        let guess = Word::parse(guess).unwrap();
        let target = Word::parse(target).unwrap();
        let feedback = evaluate(&guess, &target).unwrap();
        (guess, feedback)
    }

    #[test]
    fn plain_row_shows_symbols() {
        let (guess, feedback) = scored("slate", "crane");
        assert_eq!(plain_row(&guess, &feedback), "SLATE  --G-G");
    }

    #[test]
    fn empty_row_width() {
        assert_eq!(empty_row(5), " _  _  _  _  _ ");
    }

    #[test]
    fn keyboard_rows_cover_alphabet() {
        let mut letters: Vec<char> = KEYBOARD_ROWS.iter().flat_map(|r| r.chars()).collect();
        letters.sort_unstable();
        let alphabet: Vec<char> = ('a'..='z').collect();
        assert_eq!(letters, alphabet);
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(150.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
