//! TUI application state and logic

use crate::game::{GameStatus, SessionId, SessionView};
use crate::service::GameService;
use crate::stats::PlayerStats;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App<'a> {
    pub service: &'a GameService,
    pub user_id: String,
    /// Current game, if one could be created
    pub game: Option<(SessionId, SessionView)>,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub stats: PlayerStats,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(service: &'a GameService, user_id: &str) -> Self {
        Self {
            service,
            user_id: user_id.to_string(),
            game: None,
            input_buffer: String::new(),
            messages: Vec::new(),
            stats: service.aggregate_stats(user_id),
            should_quit: false,
            input_mode: InputMode::Guessing,
        }
    }

    /// Drop the current game (unrecorded if unfinished) and start another
    pub fn new_game(&mut self) {
        if let Some((id, _)) = self.game.take() {
            self.service.remove_session(id);
        }
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Guessing;

        match self.service.create_default_session(&self.user_id) {
            Ok((id, view)) => {
                self.add_message(
                    &format!(
                        "New game: {} letters, {} attempts. Type a word and press Enter.",
                        view.word_length, view.max_attempts
                    ),
                    MessageStyle::Info,
                );
                self.game = Some((id, view));
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    #[must_use]
    pub fn view(&self) -> Option<&SessionView> {
        self.game.as_ref().map(|(_, view)| view)
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.view()
            .map_or(self.service.config().default_word_length, |v| v.word_length)
    }

    pub fn push_letter(&mut self, letter: char) {
        if self.input_buffer.len() < self.word_length() && letter.is_ascii_alphabetic() {
            self.input_buffer.push(letter.to_ascii_lowercase());
        }
    }

    pub fn pop_letter(&mut self) {
        self.input_buffer.pop();
    }

    /// Submit the input buffer as a guess
    ///
    /// Returns true if this guess ended the game.
    pub fn submit_guess(&mut self) -> bool {
        let Some((id, _)) = self.game else {
            self.add_message("No game in progress. Press Ctrl-N.", MessageStyle::Error);
            return false;
        };
        if self.input_buffer.len() != self.word_length() {
            let msg = format!("Word must be exactly {} letters!", self.word_length());
            self.add_message(&msg, MessageStyle::Error);
            return false;
        }

        let guess = std::mem::take(&mut self.input_buffer);
        let result = match self.service.submit_guess(id, &guess) {
            Ok(result) => result,
            Err(err) => {
                self.input_buffer = guess;
                self.add_message(&err.to_string(), MessageStyle::Error);
                return false;
            }
        };

        if let Ok(view) = self.service.get_session(id) {
            self.game = Some((id, view));
        }

        match result.status {
            GameStatus::Playing => false,
            GameStatus::Won => {
                let celebration = match result.attempt.ordinal {
                    1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
                    2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                    3 => "✨ SPLENDID! Three guesses! ✨",
                    4 => "👏 GREAT JOB! Four guesses! 👏",
                    5 => "🎉 NICE WORK! Five guesses! 🎉",
                    _ => "😅 PHEW! Got it! 😅",
                };
                self.finish(celebration, MessageStyle::Success);
                true
            }
            GameStatus::Lost => {
                let target = result
                    .revealed_target
                    .map_or_else(String::new, |w| w.text().to_uppercase());
                self.finish(&format!("Out of attempts! The word was {target}"), MessageStyle::Error);
                true
            }
        }
    }

    fn finish(&mut self, text: &str, style: MessageStyle) {
        self.input_mode = InputMode::GameOver;
        self.stats = self.service.aggregate_stats(&self.user_id);
        self.add_message(text, style);
        self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// `on_game_over` runs once after every finished game.
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App, on_game_over: impl FnMut(&GameService)) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, on_game_over);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut on_game_over: impl FnMut(&GameService),
) -> Result<()> {
    app.new_game();

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match (key.code, app.input_mode) {
                (KeyCode::Char('c'), _) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                (KeyCode::Char('n'), _) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.new_game();
                }
                (KeyCode::Esc, _) | (KeyCode::Char('q'), InputMode::GameOver) => {
                    app.should_quit = true;
                }
                (KeyCode::Char('n'), InputMode::GameOver) => app.new_game(),
                (KeyCode::Char(c), InputMode::Guessing) => app.push_letter(c),
                (KeyCode::Backspace, InputMode::Guessing) => app.pop_letter(),
                (KeyCode::Enter, InputMode::Guessing) => {
                    if app.submit_guess() {
                        on_game_over(app.service);
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    if let Some((id, _)) = app.game.take() {
        app.service.remove_session(id);
    }
    Ok(())
}
