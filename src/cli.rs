use crate::evaluator::Feedback;
use crate::game_state::{Effect, GameInterface, GameState, MAX_GUESSES, UserAction};
use crate::input::InputEvent;
use crate::service::{WordServiceError, puzzle_number};
use crate::word::{WORD_LENGTH, Word};
use chrono::NaiveDate;
use clap::Parser;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

const LOADING_POLL_INTERVAL_MS: u64 = 10;

/// Wordle game options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Play this word instead of the word of the day
    #[arg(short = 'w', long = "word")]
    pub word: Option<Word>,

    /// Puzzle date as YYYY-MM-DD (defaults to today)
    #[arg(short = 'd', long = "date")]
    pub date: Option<NaiveDate>,

    /// Line-based play instead of the full screen interface
    #[arg(long)]
    pub plain: bool,

    /// Where to write the log file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// A line is a guess if it has at most five letters and nothing else.
/// Shorter lines are let through so the game can reject them itself.
fn is_guess_line(line: &str) -> bool {
    line.chars().count() <= WORD_LENGTH && line.chars().all(|c| c.is_ascii_alphabetic())
}

/// One line per submitted row, e.g. `1. CRANE  XXGXG`.
#[must_use]
pub fn format_board(state: &GameState) -> Vec<String> {
    state
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{}. {}  {}", i + 1, row.guess, row.result))
        .collect()
}

/// Guessed letters grouped by the best feedback they have received.
#[must_use]
pub fn format_hints(state: &GameState) -> Vec<String> {
    let hints = state.letter_hints();
    [
        ("Correct", Feedback::Correct),
        ("Present", Feedback::Present),
        ("Absent", Feedback::Absent),
    ]
    .iter()
    .filter_map(|&(label, wanted)| {
        let letters: Vec<String> = hints
            .iter()
            .filter(|&(_, &feedback)| feedback == wanted)
            .map(|(letter, _)| letter.to_string())
            .collect();
        (!letters.is_empty()).then(|| format!("{label}: {}", letters.join(" ")))
    })
    .collect()
}

/// Line-based implementation of [`GameInterface`].
///
/// Each line read is one guess; `exit` quits and `next` moves on to the
/// next puzzle. An empty line resubmits whatever is still buffered.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    pending: VecDeque<InputEvent>,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// Give back the output sink.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            log::warn!("failed to write to output: {e}");
        }
    }

    fn show_board(&mut self, state: &GameState) {
        for line in format_board(state) {
            self.say(&line);
        }
        for line in format_hints(state) {
            self.say(&line);
        }
    }

    fn prompt(&mut self, state: Option<&GameState>) {
        let text = match state {
            None => "No puzzle loaded. Type 'next' to try again or 'exit' to quit.".to_string(),
            Some(state) if state.is_terminal() => {
                "Type 'next' for the next puzzle or 'exit' to quit.".to_string()
            }
            Some(state) => format!(
                "\nGuess {}/{} (5 letters, 'next' for a new game, 'exit' to quit):",
                state.current_row() + 1,
                MAX_GUESSES
            ),
        };
        self.say(&text);
    }

    /// Read one line. `None` on end of input or a read error.
    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_uppercase()),
            Err(e) => {
                log::error!("failed to read input: {e}");
                None
            }
        }
    }

    fn queue_guess(&mut self, state: &GameState, line: &str) {
        if !line.is_empty() {
            for _ in 0..state.buffer().len() {
                self.pending.push_back(InputEvent::Backspace);
            }
            let mut key = [0u8; 4];
            self.pending.extend(
                line.chars()
                    .filter_map(|c| InputEvent::from_key(c.encode_utf8(&mut key))),
            );
        }
        self.pending.push_back(InputEvent::Enter);
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_loading(&mut self, puzzle: NaiveDate, tick: usize) -> Option<UserAction> {
        if tick == 0 {
            self.say(&format!("Fetching the word for {puzzle}..."));
        } else {
            thread::sleep(Duration::from_millis(LOADING_POLL_INTERVAL_MS));
        }
        None
    }

    fn display_service_error(&mut self, error: &WordServiceError) {
        self.say(&format!("Could not fetch the word of the day: {error}"));
    }

    fn display_new_game(&mut self, puzzle: NaiveDate, _state: &GameState) {
        self.pending.clear();
        self.say(&format!(
            "Puzzle #{} ({puzzle}). You have {MAX_GUESSES} guesses.",
            puzzle_number(puzzle)
        ));
    }

    fn next_action(&mut self, state: Option<&GameState>) -> Option<UserAction> {
        if let Some(event) = self.pending.pop_front() {
            return Some(UserAction::Input(event));
        }

        self.prompt(state);
        let Some(line) = self.read_line() else {
            return Some(UserAction::Exit);
        };

        match line.as_str() {
            "EXIT" => Some(UserAction::Exit),
            "NEXT" => Some(UserAction::NewGame),
            _ => match state {
                Some(state) if !state.is_terminal() && is_guess_line(&line) => {
                    self.queue_guess(state, &line);
                    self.pending.pop_front().map(UserAction::Input)
                }
                Some(state) if !state.is_terminal() => {
                    self.say("Invalid guess. Please enter 5 letters.");
                    None
                }
                _ => None,
            },
        }
    }

    fn display_effect(&mut self, state: &GameState, effect: &Effect) {
        match effect {
            Effect::BufferChanged | Effect::Ignored => {}
            Effect::IncompleteGuess => self.say("Guess must be exactly 5 letters!"),
            Effect::InvalidWord(word) => self.say(&format!("{word} is not in the word list.")),
            Effect::ServiceUnavailable(reason) => {
                self.say(&format!(
                    "Could not check the word: {reason}. Press enter to try again."
                ));
            }
            Effect::RowEvaluated { row, .. } => {
                self.show_board(state);
                let left = MAX_GUESSES - row - 1;
                self.say(&format!("{left} guesses left."));
            }
            Effect::Won { row } => {
                self.show_board(state);
                self.say(&format!("Solved in {}/{MAX_GUESSES}!", row + 1));
            }
            Effect::Lost { secret } => {
                self.show_board(state);
                self.say(&format!("Out of guesses. The word was {secret}."));
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}
