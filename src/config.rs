//! Game configuration stored as TOML (`wordle.toml` by default).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::{MAX_WORD_LENGTH, Word};
use crate::game::MAX_ATTEMPTS;
use crate::service::ServiceConfig;
use crate::wordlists::{DailyWordSource, RandomWordSource, Vocabulary, WordSource, loader};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "wordle.toml";

/// How new sessions pick their target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordSourceKind {
    /// Uniform random pick per session.
    #[default]
    Random,
    /// Same word for everyone on a given UTC day.
    Daily,
}

/// Game configuration (TOML).
///
/// Missing fields take their defaults, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// Letters per word for new sessions.
    pub word_length: usize,

    /// Guesses allowed per session.
    pub max_attempts: usize,

    /// Only accept guesses found in the vocabulary.
    pub strict_vocabulary: bool,

    pub word_source: WordSourceKind,

    /// Seed for the random source, or the schedule offset for the daily one.
    pub seed: Option<u64>,

    /// Replace the embedded vocabulary with a word-per-line file.
    pub word_list: Option<PathBuf>,

    /// Where player statistics are persisted.
    pub stats_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_length: 5,
            max_attempts: 6,
            strict_vocabulary: false,
            word_source: WordSourceKind::Random,
            seed: None,
            word_list: None,
            stats_path: PathBuf::from("wordle-stats.json"),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 || self.word_length > MAX_WORD_LENGTH {
            return Err(anyhow!(
                "word_length must be between 1 and {MAX_WORD_LENGTH}"
            ));
        }
        if self.max_attempts == 0 || self.max_attempts > MAX_ATTEMPTS {
            return Err(anyhow!(
                "max_attempts must be between 1 and {MAX_ATTEMPTS}"
            ));
        }
        if self.stats_path.as_os_str().is_empty() {
            return Err(anyhow!("stats_path must not be empty"));
        }
        Ok(())
    }

    /// Parse a fixed target and match the default word length to it.
    pub fn apply_target(&mut self, target: &str) -> Result<Word> {
        let word = Word::parse(target.trim()).context("invalid --target")?;
        self.word_length = word.len();
        Ok(word)
    }

    /// Embedded vocabulary, or the configured word list.
    pub fn load_vocabulary(&self) -> Result<Vocabulary> {
        let vocabulary = match &self.word_list {
            Some(path) => Vocabulary::new(
                loader::load_from_file(path)
                    .with_context(|| format!("read word list {}", path.display()))?,
            ),
            None => Vocabulary::embedded(),
        };
        if vocabulary.words_of_length(self.word_length).is_empty() {
            return Err(anyhow!(
                "word list has no {}-letter words",
                self.word_length
            ));
        }
        Ok(vocabulary)
    }

    #[must_use]
    pub fn word_source(&self, vocabulary: Arc<Vocabulary>) -> Box<dyn WordSource> {
        match (self.word_source, self.seed) {
            (WordSourceKind::Random, Some(seed)) => {
                Box::new(RandomWordSource::with_seed(vocabulary, seed))
            }
            (WordSourceKind::Random, None) => Box::new(RandomWordSource::new(vocabulary)),
            (WordSourceKind::Daily, offset) => {
                Box::new(DailyWordSource::new(vocabulary, offset.unwrap_or(0)))
            }
        }
    }

    #[must_use]
    pub const fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            strict_vocabulary: self.strict_vocabulary,
            default_word_length: self.word_length,
            default_max_attempts: self.max_attempts,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GameConfig::default()`.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        let cfg = GameConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GameConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("wordle.toml");
        fs::write(&path, "max_attempts = 8\nword_source = \"daily\"\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.max_attempts, 8);
        assert_eq!(cfg.word_length, 5);
        assert_eq!(cfg.word_source, WordSourceKind::Daily);
        assert!(!cfg.strict_vocabulary);
    }

    #[test]
    fn invalid_values_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("wordle.toml");

        fs::write(&path, "max_attempts = 0\n").expect("write");
        assert!(load_config(&path).is_err());

        fs::write(&path, format!("max_attempts = {}\n", MAX_ATTEMPTS + 1)).expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("max_attempts"));

        fs::write(&path, format!("max_attempts = {MAX_ATTEMPTS}\n")).expect("write");
        assert_eq!(load_config(&path).expect("load").max_attempts, MAX_ATTEMPTS);

        fs::write(&path, "word_length = 40\n").expect("write");
        assert!(load_config(&path).is_err());

        fs::write(&path, "word_source = \"hourly\"\n").expect("write");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn target_sets_word_length_in_letters() {
        let mut cfg = GameConfig::default();
        let word = cfg.apply_target(" Planet ").expect("target");
        assert_eq!(word.text(), "planet");
        assert_eq!(cfg.word_length, 6);

        let mut cfg = GameConfig::default();
        assert!(cfg.apply_target("\u{212A}nife").is_err());
        assert!(cfg.apply_target("caf\u{e9}s").is_err());
        assert_eq!(cfg.word_length, 5);
    }

    #[test]
    fn default_round_trips_through_toml() {
        let cfg = GameConfig::default();
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: GameConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn custom_word_list_is_used() {
        let temp = tempfile::tempdir().expect("tempdir");
        let list = temp.path().join("words.txt");
        fs::write(&list, "zebra\nquilt\n").expect("write");

        let cfg = GameConfig {
            word_list: Some(list),
            ..GameConfig::default()
        };
        let vocabulary = cfg.load_vocabulary().expect("vocabulary");
        assert_eq!(vocabulary.len(), 2);

        let source = cfg.word_source(Arc::new(vocabulary));
        let picked = source.pick(5).expect("pick");
        assert!(["zebra", "quilt"].contains(&picked.text()));
    }

    #[test]
    fn word_list_without_configured_length_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let list = temp.path().join("words.txt");
        fs::write(&list, "cat\ndog\n").expect("write");

        let cfg = GameConfig {
            word_list: Some(list),
            ..GameConfig::default()
        };
        assert!(cfg.load_vocabulary().is_err());
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let cfg = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let vocabulary = Arc::new(Vocabulary::embedded());
        let a = cfg.word_source(Arc::clone(&vocabulary));
        let b = cfg.word_source(vocabulary);
        let picks_a: Vec<Word> = (0..5).map(|_| a.pick(5).unwrap()).collect();
        let picks_b: Vec<Word> = (0..5).map(|_| b.pick(5).unwrap()).collect();
        assert_eq!(picks_a, picks_b);
    }
}
