use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const WORD_LENGTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("expected {WORD_LENGTH} letters, got {0}")]
    WrongLength(usize),
    #[error("'{0}' is not a letter")]
    NotALetter(char),
}

/// A five letter word, stored as uppercase ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Parse a word, accepting either case.
    pub fn new(text: &str) -> Result<Self, WordError> {
        let count = text.chars().count();
        if count != WORD_LENGTH {
            return Err(WordError::WrongLength(count));
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(text.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::NotALetter(c));
            }
            *slot = c.to_ascii_uppercase() as u8;
        }
        Ok(Self(letters))
    }

    pub(crate) fn from_letters(letters: [u8; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    #[must_use]
    pub fn letters(&self) -> [u8; WORD_LENGTH] {
        self.0
    }

    #[must_use]
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| b as char)
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
