//! Simple interactive CLI mode
//!
//! Line-based game without TUI: one guess per line, colored tiles after each.

use crate::game::SessionId;
use crate::output::{print_board, print_game_over, print_stats};
use crate::service::GameService;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Run the simple interactive CLI mode on stdin
///
/// `on_game_over` runs once after every finished game.
///
/// # Errors
///
/// Returns an error if reading input fails or a session cannot be created.
pub fn run_simple(
    service: &GameService,
    user_id: &str,
    on_game_over: impl FnMut(&GameService),
) -> Result<()> {
    let stdin = io::stdin();
    play_lines(service, user_id, stdin.lock(), on_game_over)
}

/// Game loop over any line source
///
/// # Errors
///
/// Returns an error if reading input fails or a session cannot be created.
pub fn play_lines<R: BufRead>(
    service: &GameService,
    user_id: &str,
    mut input: R,
    mut on_game_over: impl FnMut(&GameService),
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Wordle - Simple Mode                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    'games: loop {
        let (id, view) = service.create_default_session(user_id)?;
        println!(
            "New game: {} letters, {} attempts",
            view.word_length.to_string().bright_cyan().bold(),
            view.max_attempts.to_string().bright_cyan().bold()
        );
        print_board(&view);

        loop {
            let Some(line) = read_line(&mut input, "Guess")? else {
                service.remove_session(id);
                return Ok(());
            };

            match line.to_lowercase().as_str() {
                "" => {}
                "quit" | "q" | "exit" => {
                    service.remove_session(id);
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
                "new" | "n" => {
                    service.remove_session(id);
                    println!("\n🔄 New game started!\n");
                    continue 'games;
                }
                "help" | "?" => print_help(),
                "stats" => print_stats(
                    user_id,
                    &service.aggregate_stats(user_id),
                    service.config().default_max_attempts,
                ),
                guess => {
                    if finish_turn(service, id, guess)? {
                        on_game_over(service);
                        service.remove_session(id);
                        break;
                    }
                }
            }
        }

        let again = read_line(&mut input, "Play again? (yes/no)")?.unwrap_or_default();
        if !matches!(again.to_lowercase().as_str(), "yes" | "y") {
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        }
    }
}

/// Submit one guess and redraw; true once the game is over
fn finish_turn(service: &GameService, id: SessionId, guess: &str) -> Result<bool> {
    match service.submit_guess(id, guess) {
        Ok(result) => {
            let view = service.get_session(id)?;
            print_board(&view);
            if result.status.is_terminal() {
                print_game_over(&view);
                return Ok(true);
            }
            println!("{} attempts left", view.attempts_remaining);
        }
        Err(err) => println!("{} {err}", "❌".red()),
    }
    Ok(false)
}

fn print_help() {
    println!("Type a word and press Enter to guess.");
    println!("  - {} right letter, right spot", " G ".black().on_green());
    println!("  - {} in the word, wrong spot", " Y ".black().on_yellow());
    println!("  - {} not in the word", " - ".white().on_bright_black());
    println!("Commands: 'new', 'stats', 'help', 'quit'\n");
}

/// Prompt and read one trimmed line; None at end of input
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
