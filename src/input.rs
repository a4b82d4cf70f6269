//! Letter collection for the row being typed.

use crate::debug_log;
use crate::word::{WORD_LENGTH, Word};

/// A single key press after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Letter(char),
    Backspace,
    Enter,
}

impl InputEvent {
    /// Map a key name to an event.
    ///
    /// Single letters (either case), `Enter` and `Backspace` are recognised;
    /// everything else is ignored.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        debug_log!("key pressed: {:?}", key);
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Some(Self::Letter(c.to_ascii_uppercase()))
            }
            _ => match key {
                "Enter" => Some(Self::Enter),
                "Backspace" => Some(Self::Backspace),
                _ => None,
            },
        }
    }
}

/// Up to five uppercase letters, editable until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessBuffer {
    letters: Vec<u8>,
}

impl GuessBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a letter. A full buffer has its last letter replaced instead.
    ///
    /// Returns `false` if `c` is not an ASCII letter.
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii_alphabetic() {
            return false;
        }
        if self.letters.len() == WORD_LENGTH {
            self.letters.pop();
        }
        self.letters.push(c.to_ascii_uppercase() as u8);
        true
    }

    /// Remove the last letter, if any.
    pub fn pop(&mut self) -> Option<char> {
        self.letters.pop().map(char::from)
    }

    pub fn clear(&mut self) {
        self.letters.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.letters.len() == WORD_LENGTH
    }

    /// The letter in position `index`, if typed yet.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied().map(char::from)
    }

    /// The buffered word, once all five letters are in.
    #[must_use]
    pub fn word(&self) -> Option<Word> {
        let letters: [u8; WORD_LENGTH] = self.letters.as_slice().try_into().ok()?;
        Some(Word::from_letters(letters))
    }

    #[must_use]
    pub fn as_string(&self) -> String {
        self.letters.iter().copied().map(char::from).collect()
    }
}
