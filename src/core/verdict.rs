//! Per-letter verdicts and the feedback sequence for one guess
//!
//! Each position of a guess gets one of three verdicts:
//! - Absent (letter not in word, or all its occurrences already claimed)
//! - Present (letter in word, wrong position)
//! - Correct (letter in correct position)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome for a single letter position
///
/// Variants are declared in rank order so the derived `Ord` agrees with
/// [`Verdict::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Absent,
    Present,
    Correct,
}

impl Verdict {
    /// Numeric rank used for upgrade-only merging: Correct=2 > Present=1 > Absent=0
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }

    /// The higher-ranked of two verdicts
    #[inline]
    #[must_use]
    pub const fn best(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Emoji tile for this verdict
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Single-character ASCII form: G, Y or -
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }
}

/// The ordered verdicts for one guess, index-aligned with the guess letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback(Vec<Verdict>);

impl Feedback {
    pub(crate) const fn from_verdicts(verdicts: Vec<Verdict>) -> Self {
        Self(verdicts)
    }

    #[inline]
    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every position is `Correct`
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&v| v == Verdict::Correct)
    }

    /// Count of `Correct` positions
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&v| v == Verdict::Correct).count()
    }

    /// Count of `Present` positions
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&v| v == Verdict::Present).count()
    }

    /// Render as an emoji string like "⬜⬜🟨⬜🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|v| v.emoji()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for verdict in &self.0 {
            write!(f, "{}", verdict.symbol())?;
        }
        Ok(())
    }
}
