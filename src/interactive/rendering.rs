//! TUI rendering with ratatui
//!
//! Board, keyboard and statistics panels for the game.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{KeyboardStatus, Verdict};
use crate::game::SessionView;
use crate::output::formatters::KEYBOARD_ROWS;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Board and keyboard
            Constraint::Percentage(50), // Stats and messages
        ])
        .split(chunks[1]);

    render_play_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🟩 WORDLE 🟨")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn tile_style(verdict: Option<Verdict>) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match verdict {
        Some(Verdict::Correct) => base.fg(Color::Black).bg(Color::Green),
        Some(Verdict::Present) => base.fg(Color::Black).bg(Color::Yellow),
        Some(Verdict::Absent) => base.fg(Color::White).bg(Color::DarkGray),
        None => Style::default().fg(Color::White),
    }
}

fn tile(letter: char, verdict: Option<Verdict>) -> Span<'static> {
    Span::styled(
        format!(" {} ", letter.to_ascii_uppercase()),
        tile_style(verdict),
    )
}

/// Board rows: scored attempts, the row being typed, then blanks
fn board_lines<'a>(view: &SessionView, input: &str, typing: bool) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = view
        .attempts
        .iter()
        .map(|attempt| {
            let spans: Vec<Span> = attempt
                .guess
                .text()
                .chars()
                .zip(attempt.feedback.verdicts())
                .flat_map(|(letter, &verdict)| [tile(letter, Some(verdict)), Span::raw(" ")])
                .collect();
            Line::from(spans)
        })
        .collect();

    let mut remaining = view.attempts_remaining;
    if typing && remaining > 0 {
        let typed: Vec<char> = input.chars().collect();
        let spans: Vec<Span> = (0..view.word_length)
            .flat_map(|i| {
                let cell = typed.get(i).map_or_else(
                    || Span::styled(" _ ", Style::default().fg(Color::DarkGray)),
                    |&c| tile(c, None),
                );
                [cell, Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
        remaining -= 1;
    }

    for _ in 0..remaining {
        let blank = " _  ".repeat(view.word_length);
        lines.push(Line::styled(blank, Style::default().fg(Color::DarkGray)));
    }
    lines
}

fn keyboard_lines<'a>(keyboard: &KeyboardStatus) -> Vec<Line<'a>> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let mut spans = vec![Span::raw(" ".repeat(indent * 2))];
            for letter in row.chars() {
                spans.push(tile(letter, keyboard.get(letter)));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_play_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Board
            Constraint::Length(5), // Keyboard
        ])
        .split(area);

    let (board, keyboard) = app.view().map_or_else(
        || (vec![Line::from("No game in progress")], Vec::new()),
        |view| {
            (
                board_lines(view, &app.input_buffer, app.input_mode == InputMode::Guessing),
                keyboard_lines(&view.keyboard),
            )
        },
    );

    let board = Paragraph::new(board).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, chunks[0]);

    let keyboard = Paragraph::new(keyboard)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Keyboard ").borders(Borders::ALL));
    f.render_widget(keyboard, chunks[1]);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Win rate gauge
            Constraint::Min(5),    // Distribution
            Constraint::Length(7), // Messages
        ])
        .split(area);

    render_win_rate(f, app, chunks[0]);
    render_distribution(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_win_rate(f: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" {} ", app.user_id))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(stats.win_percentage().clamp(0.0, 100.0) as u16)
        .label(format!(
            "Played {} | Win {:.0}% | Streak {} (max {})",
            stats.played,
            stats.win_percentage(),
            stats.current_streak,
            stats.max_streak
        ));

    f.render_widget(gauge, area);
}

/// Scaled bar width; any nonzero count shows at least one cell
fn bar_len(count: u32, most: u32, width: usize) -> usize {
    if count == 0 || most == 0 {
        return 0;
    }
    (count as usize * width / most as usize).max(1)
}

fn render_distribution(f: &mut Frame, app: &App, area: Rect) {
    let max_attempts = app
        .view()
        .map_or(app.service.config().default_max_attempts, |v| v.max_attempts);
    let distribution = app.stats.distribution_filled(max_attempts);
    let most = distribution.values().copied().max().unwrap_or(0).max(1);
    let width = usize::from(area.width.saturating_sub(12));

    let lines: Vec<Line> = distribution
        .iter()
        .map(|(&attempts, &count)| {
            let bar_len = bar_len(count, most, width);
            Line::from(vec![
                Span::raw(format!("{attempts:>2} ")),
                Span::styled("█".repeat(bar_len), Style::default().fg(Color::Green)),
                Span::raw(format!(" {count}")),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Guess Distribution ")
            .borders(Borders::ALL),
    );
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::GameOver => (
            " Game over | Press 'n' for new game or 'q' to quit ",
            String::new(),
            Color::Green,
        ),
        InputMode::Guessing => (
            " Type your guess | Enter to submit ",
            app.input_buffer.to_uppercase(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let remaining = app
        .view()
        .map_or(0, |view| view.attempts_remaining);
    let help_text = format!(
        "Attempts left: {remaining} | Esc: Quit | Ctrl-N: New Game | Enter: Submit"
    );

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::service::{GameService, ServiceConfig};
    use crate::wordlists::loader::words_from_slice;
    use crate::wordlists::{FixedWordSource, Vocabulary};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    #[test]
    fn board_has_one_row_per_attempt() {
        let service = GameService::new(
            Box::new(FixedWordSource::new(Word::parse("crane").unwrap())),
            Arc::new(Vocabulary::new(words_from_slice(&["crane", "slate"]))),
            ServiceConfig::default(),
        );
        let (id, _) = service.create_default_session("erin").unwrap();
        service.submit_guess(id, "slate").unwrap();
        let view = service.get_session(id).unwrap();

        assert_eq!(board_lines(&view, "cr", true).len(), 6);
        assert_eq!(board_lines(&view, "", false).len(), 6);
        assert_eq!(keyboard_lines(&view.keyboard).len(), 3);
    }

    #[test]
    fn empty_distribution_buckets_draw_no_bar() {
        assert_eq!(bar_len(0, 1, 40), 0);
        assert_eq!(bar_len(0, 9, 40), 0);
        assert_eq!(bar_len(1, 100, 40), 1);
        assert_eq!(bar_len(100, 100, 40), 40);
        assert_eq!(bar_len(50, 100, 40), 20);
    }

    #[test]
    fn draws_without_panicking() {
        let service = GameService::new(
            Box::new(FixedWordSource::new(Word::parse("crane").unwrap())),
            Arc::new(Vocabulary::new(words_from_slice(&["crane"]))),
            ServiceConfig::default(),
        );
        let mut app = App::new(&service, "erin");
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| ui(f, &app)).unwrap();
        app.new_game();
        app.push_letter('c');
        terminal.draw(|f| ui(f, &app)).unwrap();
    }
}
