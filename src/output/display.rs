//! Display functions for command results

use super::formatters::{
    KEYBOARD_ROWS, create_progress_bar, empty_row, guess_tiles, keyboard_row, plain_row,
};
use crate::commands::{EvaluationResult, SimulationResult};
use crate::game::{GameStatus, SessionView};
use crate::stats::PlayerStats;
use colored::Colorize;

/// Print a one-off evaluation
pub fn print_evaluation(result: &EvaluationResult) {
    println!("\n{}", guess_tiles(&result.guess, &result.feedback));
    println!(
        "{}  {}",
        plain_row(&result.guess, &result.feedback),
        result.feedback.to_emoji()
    );
    println!(
        "Correct: {}  Present: {}",
        result.feedback.count_correct().to_string().green().bold(),
        result.feedback.count_present().to_string().yellow().bold()
    );
    if result.solved() {
        println!("{}", "✅ Exact match!".green().bold());
    }
}

/// Print the board: one row per attempt, then placeholders for the rest
pub fn print_board(view: &SessionView) {
    println!();
    for attempt in &view.attempts {
        println!(
            "  {} {}",
            format!("{}.", attempt.ordinal).bright_black(),
            guess_tiles(&attempt.guess, &attempt.feedback)
        );
    }
    for ordinal in view.attempts.len() + 1..=view.max_attempts {
        println!(
            "  {} {}",
            format!("{ordinal}.").bright_black(),
            empty_row(view.word_length).bright_black()
        );
    }
    println!();
    for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
        println!("  {}{}", " ".repeat(indent * 2), keyboard_row(&view.keyboard, row));
    }
    println!();
}

/// Print the end-of-game banner
pub fn print_game_over(view: &SessionView) {
    let target = view
        .target
        .as_ref()
        .map_or_else(String::new, |w| w.text().to_uppercase());

    match view.status {
        GameStatus::Won => {
            let attempts = view.attempts.len();
            println!(
                "{}",
                format!(
                    "🎉 Solved in {attempts} {}!",
                    if attempts == 1 { "guess" } else { "guesses" }
                )
                .green()
                .bold()
            );
        }
        GameStatus::Lost => {
            println!(
                "{} {}",
                "❌ Out of attempts. The word was".red().bold(),
                target.bright_yellow().bold()
            );
        }
        GameStatus::Playing => {}
    }

    let share: Vec<String> = view
        .attempts
        .iter()
        .map(|attempt| attempt.feedback.to_emoji())
        .collect();
    println!("\n{}", share.join("\n"));
}

/// Print a player's aggregate statistics
pub fn print_stats(user_id: &str, stats: &PlayerStats, max_attempts: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "STATISTICS:".bright_cyan().bold(),
        user_id.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Played:           {}", stats.played);
    println!(
        "   Win %:            [{}] {}",
        create_progress_bar(stats.win_percentage(), 100.0, 20).green(),
        format!("{:.0}", stats.win_percentage()).bright_yellow().bold()
    );
    println!("   Current streak:   {}", stats.current_streak);
    println!("   Max streak:       {}", stats.max_streak);

    let distribution = stats.distribution_filled(max_attempts);
    let most = distribution.values().copied().max().unwrap_or(0);
    println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
    for (attempts, count) in distribution {
        print_distribution_bar(attempts, count as usize, most as usize, stats.won as usize);
    }
}

/// Print the results of a simulation run
pub fn print_simulation_result(result: &SimulationResult, max_attempts: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.games);
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", result.win_percentage()).bright_yellow().bold()
    );
    println!(
        "   Average to win:   {}",
        format!("{:.2}", result.average_attempts_to_win).bright_yellow()
    );
    println!("   Lost:             {}", format!("{}", result.lost).red());
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    let most = result.distribution.values().copied().max().unwrap_or(0);
    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for attempts in 1..=max_attempts {
        let count = result.distribution.get(&attempts).copied().unwrap_or(0);
        print_distribution_bar(attempts, count, most, result.games);
    }
}

fn print_distribution_bar(attempts: usize, count: usize, most: usize, total: usize) {
    let bar_width = if most == 0 { 0 } else { count * 40 / most };
    let pct = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    };
    let bar = format!(
        "{}{}",
        "█".repeat(bar_width).green(),
        "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
    );
    println!("   {attempts}: {bar} {count:4} ({pct:5.1}%)");
}
