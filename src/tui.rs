//! TUI (Terminal User Interface) module for the Wordle game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! `TuiInterface` implements [`GameInterface`]: it renders a snapshot of the
//! latest [`GameState`] it was handed and turns key presses into
//! [`UserAction`]s. All game rules live in the game state; the interface
//! only decides which keys mean what.
//!
//! # Keys
//! - Letters, `Backspace` and `Enter` go to the game while a row is open
//! - `N` starts the next puzzle once the current one is over (or retries a
//!   failed word fetch)
//! - `Esc` or `Ctrl+C` quits

use crate::evaluator::Feedback;
use crate::game_state::{Effect, GameInterface, GameState, MAX_GUESSES, UserAction};
use crate::input::InputEvent;
use crate::service::{WordServiceError, puzzle_number};
use crate::word::WORD_LENGTH;
use crate::{debug_log, info_log};
use chrono::NaiveDate;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const LOADING_POLL_TIMEOUT_MS: u64 = 50;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// On-screen keyboard layout for the letter hints panel.
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum TileState {
    Empty,
    Entered,
    Invalid,
    Scored(Feedback),
}

impl TileState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Invalid => (Color::Red, Color::White),
            Self::Scored(Feedback::Correct) => (Color::Green, Color::Black),
            Self::Scored(Feedback::Present) => (Color::Yellow, Color::Black),
            Self::Scored(Feedback::Absent) => (Color::Gray, Color::White),
        }
    }
}

/// Letters and tile states for one board row.
fn board_row(state: &GameState, index: usize) -> [(char, TileState); WORD_LENGTH] {
    let mut tiles = [(' ', TileState::Empty); WORD_LENGTH];
    if let Some(row) = state.rows().get(index) {
        for (tile, (letter, feedback)) in tiles
            .iter_mut()
            .zip(row.guess.chars().zip(row.result.iter()))
        {
            *tile = (letter, TileState::Scored(feedback));
        }
    } else if index == state.rows().len() && !state.is_terminal() {
        let entered = if state.is_invalid() {
            TileState::Invalid
        } else {
            TileState::Entered
        };
        for (i, tile) in tiles.iter_mut().enumerate() {
            if let Some(letter) = state.buffer().get(i) {
                *tile = (letter, entered);
            }
        }
    }
    tiles
}

/// What a key press means for the game on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum KeyOutcome {
    Action(UserAction),
    /// A character key that is not a letter while a row is open.
    NotALetter(char),
    Unused,
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a key press to an action. `game` is `None` when no puzzle is loaded.
///
/// Quit keys always work. Letters, `Backspace` and `Enter` only reach an open
/// row; `N` only starts a new puzzle when there is no row to play.
fn map_key(key: &KeyEvent, game: Option<&GameState>) -> KeyOutcome {
    if is_quit_key(key) {
        return KeyOutcome::Action(UserAction::Exit);
    }
    if has_modifier_keys(key) {
        return KeyOutcome::Unused;
    }

    match game {
        Some(game) if !game.is_terminal() => match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                KeyOutcome::Action(UserAction::Input(InputEvent::Letter(c)))
            }
            KeyCode::Char(c) => KeyOutcome::NotALetter(c),
            KeyCode::Backspace => KeyOutcome::Action(UserAction::Input(InputEvent::Backspace)),
            KeyCode::Enter => KeyOutcome::Action(UserAction::Input(InputEvent::Enter)),
            _ => KeyOutcome::Unused,
        },
        _ => match key.code {
            KeyCode::Char('n' | 'N') => KeyOutcome::Action(UserAction::NewGame),
            _ => KeyOutcome::Unused,
        },
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    game: Option<&'a GameState>,
    puzzle: Option<NaiveDate>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input handling.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    game: Option<GameState>,
    puzzle: Option<NaiveDate>,
    message: String,
    error_message: String,
    status: String,
    closed: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            game: None,
            puzzle: None,
            message: String::new(),
            error_message: String::new(),
            status: "Starting".to_string(),
            closed: false,
        })
    }

    /// Leave raw mode and the alternate screen. Nothing is drawn afterwards.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    ///
    /// Returns an error if rendering fails.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game: self.game.as_ref(),
            puzzle: self.puzzle,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Game board
                Constraint::Length(5),  // Keyboard hints
                Constraint::Min(3),     // Messages
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.puzzle);
        Self::render_board(f, chunks[1], ctx.game);
        Self::render_keyboard(f, chunks[2], ctx.game);
        Self::render_info(f, chunks[3], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.game);
    }

    fn render_title(f: &mut Frame, area: Rect, puzzle: Option<NaiveDate>) {
        let text = match puzzle {
            Some(date) => format!("WORDLE #{} ({date})", puzzle_number(date)),
            None => "WORDLE".to_string(),
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, game: Option<&GameState>) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(game) = game else {
            return;
        };
        for index in 0..MAX_GUESSES {
            Self::render_row(f, inner, index, &board_row(game, index));
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_row(f: &mut Frame, area: Rect, row_index: usize, tiles: &[(char, TileState)]) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for &(letter, state) in tiles {
            let (bg_color, fg_color) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_keyboard(f: &mut Frame, area: Rect, game: Option<&GameState>) {
        let hints: BTreeMap<char, Feedback> =
            game.map(GameState::letter_hints).unwrap_or_default();

        let lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .enumerate()
            .map(|(indent, row)| {
                let mut spans = vec![Span::raw(" ".repeat(indent + 1))];
                for letter in row.chars() {
                    let state = hints
                        .get(&letter)
                        .map_or(TileState::Empty, |&feedback| TileState::Scored(feedback));
                    let (bg_color, fg_color) = state.colors();
                    spans.push(Span::styled(
                        letter.to_string(),
                        Style::default().fg(fg_color).bg(bg_color),
                    ));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, game: Option<&GameState>) {
        let text = match game {
            Some(game) if !game.is_terminal() => {
                "Type your 5-letter guess | ENTER: Submit | BACKSPACE: Correct | ESC: Quit"
            }
            Some(_) => "N: Next puzzle | ESC: Quit",
            None => "N: Retry | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Wait briefly for a key press. Non-key events and key releases are
    /// dropped.
    fn poll_key(timeout_ms: u64) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(timeout_ms))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                // Escape sequences from alt-tab show up as replacement or
                // control characters
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("poll_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("poll_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, game: Option<&GameState>) -> Option<UserAction> {
        debug_log!(
            "handle_key() - code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        match map_key(key, game) {
            KeyOutcome::Action(UserAction::Exit) => {
                info_log!("handle_key() - Quit requested");
                Some(UserAction::Exit)
            }
            KeyOutcome::Action(action) => Some(action),
            KeyOutcome::NotALetter(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            KeyOutcome::Unused => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_loading(&mut self, puzzle: NaiveDate, tick: usize) -> Option<UserAction> {
        self.puzzle = Some(puzzle);
        self.game = None;
        self.status = format!(
            "{} Fetching the word of the day...",
            SPINNER[tick % SPINNER.len()]
        );
        self.draw_or_log();

        // Quit keys give the terminal back right away, the rest are dropped
        match Self::poll_key(LOADING_POLL_TIMEOUT_MS) {
            Ok(Some(key)) if is_quit_key(&key) => {
                info_log!("display_loading() - Quit requested while loading");
                if let Err(e) = self.cleanup() {
                    log::error!("failed to restore the terminal: {e}");
                }
                Some(UserAction::Exit)
            }
            Ok(Some(key)) => {
                debug_log!("display_loading() - Dropping key {:?}", key.code);
                None
            }
            Ok(None) => None,
            Err(e) => {
                log::error!("failed to read terminal input: {e}");
                None
            }
        }
    }

    fn display_service_error(&mut self, error: &WordServiceError) {
        self.game = None;
        self.message.clear();
        self.error_message = format!("Could not fetch the word of the day: {error}");
        self.status = "No word to play".to_string();
        self.draw_or_log();
    }

    fn display_new_game(&mut self, puzzle: NaiveDate, state: &GameState) {
        self.puzzle = Some(puzzle);
        self.game = Some(state.clone());
        self.message = format!("New puzzle! You have {MAX_GUESSES} guesses.");
        self.error_message.clear();
        self.status = "Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn next_action(&mut self, state: Option<&GameState>) -> Option<UserAction> {
        self.game = state.cloned();
        self.draw_or_log();

        match Self::poll_key(EVENT_POLL_TIMEOUT_MS) {
            Ok(Some(key)) => {
                self.error_message.clear();
                let action = self.handle_key(&key, state);
                if action.is_some() {
                    debug_log!("next_action() - {:?}", action);
                }
                action
            }
            Ok(None) => None,
            Err(e) => {
                log::error!("failed to read terminal input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_effect(&mut self, state: &GameState, effect: &Effect) {
        self.game = Some(state.clone());
        match effect {
            Effect::BufferChanged | Effect::Ignored => {}
            Effect::IncompleteGuess => {
                self.error_message = "Guess must be exactly 5 letters!".to_string();
            }
            Effect::InvalidWord(word) => {
                self.error_message = format!("{word} is not in the word list");
            }
            Effect::ServiceUnavailable(reason) => {
                self.error_message = format!("Could not check the word: {reason}");
                self.status = "Press ENTER to try again".to_string();
            }
            Effect::RowEvaluated { row, .. } => {
                self.message.clear();
                self.status = format!("{} guesses left", MAX_GUESSES - row - 1);
            }
            Effect::Won { row } => {
                self.message = format!("✓ Solved in {}/{MAX_GUESSES}!", row + 1);
                self.status = "Game Over - You won".to_string();
            }
            Effect::Lost { secret } => {
                self.message = format!("The word was {secret}");
                self.status = "Game Over - Out of guesses".to_string();
            }
        }
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
