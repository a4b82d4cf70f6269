use crate::evaluator::{Feedback, RowResult, evaluate};
use crate::input::{GuessBuffer, InputEvent};
use crate::service::{WordService, WordServiceError};
use crate::session::Session;
use crate::word::Word;
use crate::{debug_log, info_log};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::thread;

pub const MAX_GUESSES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Guessing { row: usize },
    Won { row: usize },
    Lost,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Guessing { .. })
    }
}

/// A submitted guess and its feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRow {
    pub guess: Word,
    pub result: RowResult,
}

/// What a single input event did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The letters being typed changed.
    BufferChanged,
    /// Enter with fewer than five letters; nothing happened.
    IncompleteGuess,
    /// The guess is not in the dictionary.
    InvalidWord(Word),
    /// The dictionary could not be consulted.
    ServiceUnavailable(String),
    RowEvaluated { row: usize, result: RowResult },
    Won { row: usize },
    Lost { secret: Word },
    /// The event had no effect.
    Ignored,
}

/// Complete state of one puzzle.
///
/// Transitions consume the state and hand back the next one, see
/// [`GameState::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    secret: Word,
    phase: Phase,
    buffer: GuessBuffer,
    rows: Vec<GuessRow>,
    invalid: bool,
}

impl GameState {
    #[must_use]
    pub fn new(secret: Word) -> Self {
        Self {
            secret,
            phase: Phase::Guessing { row: 0 },
            buffer: GuessBuffer::new(),
            rows: Vec::with_capacity(MAX_GUESSES),
            invalid: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the row being played. Once the game is over this is the
    /// row it ended on, so it always stays below [`MAX_GUESSES`].
    #[must_use]
    pub fn current_row(&self) -> usize {
        match self.phase {
            Phase::Guessing { row } | Phase::Won { row } => row,
            Phase::Lost => MAX_GUESSES - 1,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub fn buffer(&self) -> &GuessBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn rows(&self) -> &[GuessRow] {
        &self.rows
    }

    /// Set when the last submission was not a known word; cleared by the
    /// next letter or backspace.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// The secret, once the game is over.
    #[must_use]
    pub fn revealed_secret(&self) -> Option<Word> {
        self.is_terminal().then_some(self.secret)
    }

    /// Best feedback seen so far for each guessed letter.
    #[must_use]
    pub fn letter_hints(&self) -> BTreeMap<char, Feedback> {
        let mut hints = BTreeMap::new();
        for row in &self.rows {
            for (letter, feedback) in row.guess.chars().zip(row.result.iter()) {
                hints
                    .entry(letter)
                    .and_modify(|best: &mut Feedback| *best = (*best).max(feedback))
                    .or_insert(feedback);
            }
        }
        hints
    }

    /// Apply one input event.
    ///
    /// Terminal states ignore every event.
    #[must_use]
    pub fn handle(mut self, event: InputEvent, service: &dyn WordService) -> (Self, Effect) {
        let Phase::Guessing { row } = self.phase else {
            return (self, Effect::Ignored);
        };

        let effect = match event {
            InputEvent::Letter(c) => {
                self.invalid = false;
                if self.buffer.push(c) {
                    Effect::BufferChanged
                } else {
                    Effect::Ignored
                }
            }
            InputEvent::Backspace => {
                self.invalid = false;
                match self.buffer.pop() {
                    Some(_) => Effect::BufferChanged,
                    None => Effect::Ignored,
                }
            }
            InputEvent::Enter => self.submit(row, service),
        };
        (self, effect)
    }

    fn submit(&mut self, row: usize, service: &dyn WordService) -> Effect {
        let Some(guess) = self.buffer.word() else {
            debug_log!("submit() - only {} letters, ignoring", self.buffer.len());
            return Effect::IncompleteGuess;
        };

        if guess == self.secret {
            self.record(guess, RowResult::WIN);
            self.phase = Phase::Won { row };
            info_log!("submit() - {} solved on row {}", guess, row + 1);
            return Effect::Won { row };
        }

        match service.is_valid_word(&guess) {
            Ok(true) => {}
            Ok(false) => {
                info_log!("submit() - '{}' is not in the word list", guess);
                self.invalid = true;
                return Effect::InvalidWord(guess);
            }
            Err(e) => {
                log::error!("failed to validate '{guess}': {e}");
                return Effect::ServiceUnavailable(e.to_string());
            }
        }

        let result = evaluate(&guess, &self.secret);
        self.record(guess, result);

        if row + 1 == MAX_GUESSES {
            self.phase = Phase::Lost;
            info_log!("submit() - out of guesses, secret was {}", self.secret);
            Effect::Lost {
                secret: self.secret,
            }
        } else {
            self.phase = Phase::Guessing { row: row + 1 };
            debug_log!("submit() - row {} scored {}", row + 1, result);
            Effect::RowEvaluated { row, result }
        }
    }

    fn record(&mut self, guess: Word, result: RowResult) {
        self.rows.push(GuessRow { guess, result });
        self.buffer.clear();
        self.invalid = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Input(InputEvent),
    NewGame,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Summary of a finished puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub puzzle: NaiveDate,
    pub secret: Word,
    pub outcome: Outcome,
    pub guesses: usize,
}

impl GameRecord {
    fn from_state(puzzle: NaiveDate, state: &GameState) -> Option<Self> {
        let outcome = match state.phase() {
            Phase::Guessing { .. } => return None,
            Phase::Won { .. } => Outcome::Won,
            Phase::Lost => Outcome::Lost,
        };
        Some(Self {
            puzzle,
            secret: state.secret,
            outcome,
            guesses: state.rows().len(),
        })
    }
}

/// Front-end seen by [`game_loop`].
pub trait GameInterface {
    /// Called repeatedly while the secret is being fetched. Returning
    /// [`UserAction::Exit`] stops the loop once the fetch returns; any other
    /// action is dropped.
    fn display_loading(&mut self, puzzle: NaiveDate, tick: usize) -> Option<UserAction>;
    fn display_service_error(&mut self, error: &WordServiceError);
    fn display_new_game(&mut self, puzzle: NaiveDate, state: &GameState);
    /// Next thing the player did. `state` is `None` when there is no game
    /// to play. Returning `None` means nothing happened yet.
    fn next_action(&mut self, state: Option<&GameState>) -> Option<UserAction>;
    fn display_effect(&mut self, state: &GameState, effect: &Effect);
    fn display_exit_message(&mut self);
}

enum Control {
    NewGame,
    Exit,
}

enum Fetched {
    Secret(Word),
    Failed(WordServiceError),
    Cancelled,
}

/// Play puzzles starting at `first_puzzle` until the player exits.
///
/// A new game moves on to the following day's puzzle. Returns every game
/// that was finished.
pub fn game_loop(
    service: &dyn WordService,
    interface: &mut dyn GameInterface,
    first_puzzle: NaiveDate,
) -> Vec<GameRecord> {
    let mut records = Vec::new();
    let mut puzzle = first_puzzle;

    loop {
        let secret = match fetch_secret(service, interface, puzzle) {
            Fetched::Secret(secret) => secret,
            Fetched::Failed(e) => {
                log::error!("failed to fetch the word for {puzzle}: {e}");
                interface.display_service_error(&e);
                match wait_without_game(interface) {
                    Control::NewGame => continue,
                    Control::Exit => break,
                }
            }
            Fetched::Cancelled => break,
        };
        debug_log!("game_loop() - puzzle {} secret {}", puzzle, secret);

        let mut session = Session::start(secret, service);
        interface.display_new_game(puzzle, session.state());

        match play(&mut session, interface, puzzle, &mut records) {
            Control::NewGame => {
                puzzle = puzzle.succ_opt().unwrap_or(puzzle);
                info_log!("game_loop() - new game, puzzle {}", puzzle);
            }
            Control::Exit => break,
        }
    }

    interface.display_exit_message();
    records
}

fn fetch_secret(
    service: &dyn WordService,
    interface: &mut dyn GameInterface,
    puzzle: NaiveDate,
) -> Fetched {
    thread::scope(|scope| {
        let handle = scope.spawn(move || service.word_of_the_day(puzzle));
        let mut tick = 0;
        let mut cancelled = false;
        while !handle.is_finished() {
            if let Some(UserAction::Exit) = interface.display_loading(puzzle, tick) {
                info_log!("fetch_secret() - exit requested while loading {}", puzzle);
                cancelled = true;
                break;
            }
            tick += 1;
        }
        // A scoped worker cannot be detached, so a cancelled fetch is still
        // joined before returning.
        let result = handle.join().unwrap_or_else(|_| {
            Err(WordServiceError::Unavailable(
                "word fetch panicked".to_string(),
            ))
        });
        if cancelled {
            return Fetched::Cancelled;
        }
        match result {
            Ok(secret) => Fetched::Secret(secret),
            Err(e) => Fetched::Failed(e),
        }
    })
}

fn wait_without_game(interface: &mut dyn GameInterface) -> Control {
    loop {
        match interface.next_action(None) {
            Some(UserAction::NewGame) => return Control::NewGame,
            Some(UserAction::Exit) => return Control::Exit,
            Some(UserAction::Input(_)) | None => {}
        }
    }
}

fn play(
    session: &mut Session<'_>,
    interface: &mut dyn GameInterface,
    puzzle: NaiveDate,
    records: &mut Vec<GameRecord>,
) -> Control {
    let mut recorded = false;
    loop {
        match interface.next_action(Some(session.state())) {
            Some(UserAction::Input(event)) => {
                let effect = session.dispatch(event);
                interface.display_effect(session.state(), &effect);
                if !recorded && let Some(record) = GameRecord::from_state(puzzle, session.state()) {
                    info_log!("play() - finished {:?}", record);
                    records.push(record);
                    recorded = true;
                }
            }
            Some(UserAction::NewGame) => return Control::NewGame,
            Some(UserAction::Exit) => return Control::Exit,
            None => {}
        }
    }
}
