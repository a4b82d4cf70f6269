// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod evaluator;
pub mod game_state;
pub mod input;
pub mod logging;
pub mod service;
pub mod session;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use evaluator::{Feedback, RowResult, evaluate};
pub use game_state::{
    Effect, GameInterface, GameRecord, GameState, MAX_GUESSES, Outcome, Phase, UserAction,
    game_loop,
};
pub use input::{GuessBuffer, InputEvent};
pub use service::{LocalWordService, WordService, WordServiceError};
pub use session::Session;
pub use word::{WORD_LENGTH, Word, WordError};
pub use wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
