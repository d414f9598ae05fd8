//! Word lists and target selection
//!
//! Provides the embedded vocabulary compiled into the binary, file loading,
//! and the `WordSource` implementations sessions draw their targets from.

mod embedded;
pub mod loader;
mod source;

pub use embedded::{WORDS, WORDS_COUNT};
pub use source::{DailyWordSource, FixedWordSource, RandomWordSource, WordSource};

use crate::core::Word;
use rustc_hash::{FxHashMap, FxHashSet};

/// Known words, grouped by length
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    by_length: FxHashMap<usize, Vec<Word>>,
    index: FxHashSet<Word>,
}

impl Vocabulary {
    /// Build from a word list; duplicates are dropped, first-seen order kept
    #[must_use]
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        let mut vocabulary = Self::default();
        for word in words {
            if vocabulary.index.insert(word.clone()) {
                vocabulary.by_length.entry(word.len()).or_default().push(word);
            }
        }
        vocabulary
    }

    /// The vocabulary compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(loader::words_from_slice(WORDS))
    }

    /// All words of exactly `length` letters
    #[must_use]
    pub fn words_of_length(&self, length: usize) -> &[Word] {
        self.by_length.get(&length).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }

    /// Word lengths present, ascending
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.by_length.keys().copied().collect();
        lengths.sort_unstable();
        lengths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
