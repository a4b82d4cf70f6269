//! Word of the day and dictionary lookups.
//!
//! The game only needs two answers from the outside world: which word is
//! today's secret, and whether a guess is a real word. Both go through
//! [`WordService`] so the front-ends never care where the words come from.

use crate::word::Word;
use crate::{debug_log, info_log};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordServiceError {
    #[error("word service unavailable: {0}")]
    Unavailable(String),
    #[error("word bank is empty")]
    EmptyWordBank,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Source of secret words and judge of guesses.
pub trait WordService: Sync {
    /// The secret for the puzzle on `date`.
    fn word_of_the_day(&self, date: NaiveDate) -> Result<Word, WordServiceError>;

    /// Whether `word` is accepted as a guess.
    fn is_valid_word(&self, word: &Word) -> Result<bool, WordServiceError>;
}

/// Day zero of the puzzle numbering.
#[must_use]
pub fn puzzle_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 6, 19).unwrap_or(NaiveDate::MIN)
}

/// Days between the epoch and `date`; negative before it.
#[must_use]
pub fn puzzle_number(date: NaiveDate) -> i64 {
    (date - puzzle_epoch()).num_days()
}

/// Word service backed by an in-memory word bank.
#[derive(Debug, Clone)]
pub struct LocalWordService {
    answers: Vec<Word>,
    dictionary: HashSet<Word>,
    fixed: Option<Word>,
}

impl LocalWordService {
    /// Use `words` both as the answer list and the dictionary.
    pub fn new(words: Vec<Word>) -> Result<Self, WordServiceError> {
        if words.is_empty() {
            return Err(WordServiceError::EmptyWordBank);
        }
        let dictionary = words.iter().copied().collect();
        info_log!("LocalWordService::new() - {} words", words.len());
        Ok(Self {
            answers: words,
            dictionary,
            fixed: None,
        })
    }

    /// Always answer `secret`, whatever the date. The secret is also
    /// accepted as a guess.
    #[must_use]
    pub fn with_fixed_word(mut self, secret: Word) -> Self {
        self.dictionary.insert(secret);
        self.fixed = Some(secret);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl WordService for LocalWordService {
    fn word_of_the_day(&self, date: NaiveDate) -> Result<Word, WordServiceError> {
        if let Some(secret) = self.fixed {
            return Ok(secret);
        }
        let count = i64::try_from(self.answers.len())
            .map_err(|_| WordServiceError::Unavailable("word bank too large".to_string()))?;
        if count == 0 {
            return Err(WordServiceError::EmptyWordBank);
        }
        let index = puzzle_number(date).rem_euclid(count);
        let word = usize::try_from(index)
            .ok()
            .and_then(|i| self.answers.get(i))
            .copied()
            .ok_or(WordServiceError::EmptyWordBank)?;
        debug_log!("word_of_the_day({}) - puzzle index {}", date, index);
        Ok(word)
    }

    fn is_valid_word(&self, word: &Word) -> Result<bool, WordServiceError> {
        Ok(self.dictionary.contains(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_wordbank_rejected() {
        assert!(matches!(
            LocalWordService::new(Vec::new()),
            Err(WordServiceError::EmptyWordBank)
        ));
    }

    #[test]
    fn test_word_of_the_day_cycles_by_date() {
        let service = LocalWordService::new(words(&["CRANE", "SLATE", "RAISE"])).unwrap();
        let epoch = puzzle_epoch();
        assert_eq!(service.word_of_the_day(epoch).unwrap().to_string(), "CRANE");
        assert_eq!(
            service.word_of_the_day(date(2021, 6, 20)).unwrap().to_string(),
            "SLATE"
        );
        assert_eq!(
            service.word_of_the_day(date(2021, 6, 22)).unwrap().to_string(),
            "CRANE"
        );
        // Dates before the epoch wrap around instead of failing
        assert_eq!(
            service.word_of_the_day(date(2021, 6, 18)).unwrap().to_string(),
            "RAISE"
        );
    }

    #[test]
    fn test_same_date_same_word() {
        let service = LocalWordService::new(words(&["CRANE", "SLATE", "RAISE", "STARE"])).unwrap();
        let day = date(2026, 10, 17);
        assert_eq!(
            service.word_of_the_day(day).unwrap(),
            service.word_of_the_day(day).unwrap()
        );
    }

    #[test]
    fn test_fixed_word() {
        let service = LocalWordService::new(words(&["CRANE"]))
            .unwrap()
            .with_fixed_word(Word::new("ZESTY").unwrap());
        assert_eq!(
            service.word_of_the_day(date(2030, 1, 1)).unwrap().to_string(),
            "ZESTY"
        );
        assert!(service.is_valid_word(&Word::new("ZESTY").unwrap()).unwrap());
    }

    #[test]
    fn test_is_valid_word() {
        let service = LocalWordService::new(words(&["CRANE", "SLATE"])).unwrap();
        assert!(service.is_valid_word(&Word::new("slate").unwrap()).unwrap());
        assert!(!service.is_valid_word(&Word::new("ZZZZZ").unwrap()).unwrap());
    }

    #[test]
    fn test_puzzle_number() {
        assert_eq!(puzzle_number(puzzle_epoch()), 0);
        assert_eq!(puzzle_number(date(2022, 6, 19)), 365);
    }
}
