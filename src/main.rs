//! Wordle - CLI
//!
//! Play Wordle in a TUI or plain terminal, serve games as JSON lines, or
//! run simulated games.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use wordle_game::{
    commands::{SimulationConfig, evaluate_words, run_serve, run_simple, run_simulation},
    config::{DEFAULT_CONFIG_FILE, GameConfig, load_config},
    core::Word,
    logging,
    output::{print_evaluation, print_simulation_result, print_stats},
    service::GameService,
    stats::{ANONYMOUS_USER, load_stats, write_stats},
    wordlists::{FixedWordSource, Vocabulary, WordSource},
};

#[derive(Parser)]
#[command(
    name = "wordle_game",
    about = "Wordle: guess the hidden word in a limited number of attempts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (TOML); defaults apply if it does not exist
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Letters per word (overrides the config file)
    #[arg(short, long, global = true)]
    length: Option<usize>,

    /// Guesses allowed per game (overrides the config file)
    #[arg(short, long, global = true)]
    attempts: Option<usize>,

    /// Player name statistics are recorded under
    #[arg(short, long, global = true, default_value = ANONYMOUS_USER)]
    user: String,

    /// Play against this word instead of a random one
    #[arg(short, long, global = true)]
    target: Option<String>,

    /// Reject guesses that are not in the word list
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI game (default)
    Play,

    /// Simple CLI game (no TUI)
    Simple,

    /// Score a guess against a target and print the verdicts
    Evaluate {
        /// The guessed word
        guess: String,

        /// The hidden word
        target: String,
    },

    /// Serve JSON-lines requests on stdin/stdout
    Serve,

    /// Show a player's statistics
    Stats,

    /// Autoplay many games in parallel
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    info!(?config, "configuration loaded");

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Evaluate { guess, target } => run_evaluate_command(&guess, &target),
        Commands::Stats => run_stats_command(&config, &cli.user),
        Commands::Play => {
            let vocabulary = Arc::new(config.load_vocabulary()?);
            let service = build_service(&config, vocabulary, cli.target.as_deref())?;
            run_play_command(&service, &cli.user, &config.stats_path)
        }
        Commands::Simple => {
            let vocabulary = Arc::new(config.load_vocabulary()?);
            let service = build_service(&config, vocabulary, cli.target.as_deref())?;
            run_simple(&service, &cli.user, |service| {
                persist_stats(&config.stats_path, service);
            })
        }
        Commands::Serve => {
            let vocabulary = Arc::new(config.load_vocabulary()?);
            let service = build_service(&config, vocabulary, cli.target.as_deref())?;
            run_serve(&service, &config.stats_path)
        }
        Commands::Simulate { count } => run_simulate_command(&config, cli.target.as_deref(), count),
    }
}

/// Config file plus command-line overrides
fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = load_config(&cli.config)?;
    if let Some(length) = cli.length {
        config.word_length = length;
    }
    if let Some(attempts) = cli.attempts {
        config.max_attempts = attempts;
    }
    if let Some(target) = &cli.target {
        config.apply_target(target)?;
    }
    config.strict_vocabulary |= cli.strict;
    config.validate()?;
    Ok(config)
}

fn build_service(
    config: &GameConfig,
    vocabulary: Arc<Vocabulary>,
    target: Option<&str>,
) -> Result<GameService> {
    let source: Box<dyn WordSource> = match target {
        Some(target) => Box::new(FixedWordSource::new(
            Word::parse(target.trim()).context("invalid --target")?,
        )),
        None => config.word_source(Arc::clone(&vocabulary)),
    };
    let stats = load_stats(&config.stats_path)?;

    Ok(GameService::new(source, vocabulary, config.service_config()).with_stats(stats))
}

fn persist_stats(path: &Path, service: &GameService) {
    if let Err(err) = write_stats(path, &service.stats_snapshot()) {
        warn!("failed to persist stats: {err:#}");
    }
}

fn run_evaluate_command(guess: &str, target: &str) -> Result<()> {
    let result = evaluate_words(guess, target)?;
    print_evaluation(&result);
    Ok(())
}

fn run_stats_command(config: &GameConfig, user: &str) -> Result<()> {
    let book = load_stats(&config.stats_path)?;
    print_stats(user, &book.get(user), config.max_attempts);
    Ok(())
}

fn run_play_command(service: &GameService, user: &str, stats_path: &Path) -> Result<()> {
    use wordle_game::interactive::{App, run_tui};

    let app = App::new(service, user);
    run_tui(app, |service| persist_stats(stats_path, service))
}

fn run_simulate_command(config: &GameConfig, target: Option<&str>, count: usize) -> Result<()> {
    let vocabulary = Arc::new(config.load_vocabulary()?);
    let mut words = vocabulary.words_of_length(config.word_length).to_vec();
    if let Some(target) = target {
        let target = Word::parse(target.trim()).context("invalid --target")?;
        if !words.contains(&target) {
            words.push(target);
        }
    }
    let service = build_service(config, vocabulary, target)?;

    println!(
        "Simulating {count} games ({} letters, {} attempts, {} candidate words)...",
        config.word_length,
        config.max_attempts,
        words.len()
    );

    let result = run_simulation(
        &service,
        &words,
        &SimulationConfig {
            games: count,
            word_length: config.word_length,
            max_attempts: config.max_attempts,
            show_progress: true,
        },
    );
    print_simulation_result(&result, config.max_attempts);
    Ok(())
}
