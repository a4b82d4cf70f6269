use crate::word::{WORD_LENGTH, Word};
use std::fmt;

/// Per-letter result of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feedback {
    Absent,
    Present,
    Correct,
}

impl Feedback {
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Feedback for one submitted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowResult([Feedback; WORD_LENGTH]);

impl RowResult {
    pub const WIN: Self = Self([Feedback::Correct; WORD_LENGTH]);

    #[must_use]
    pub fn new(feedback: [Feedback; WORD_LENGTH]) -> Self {
        Self(feedback)
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.0.iter().all(|&f| f == Feedback::Correct)
    }

    pub fn iter(&self) -> impl Iterator<Item = Feedback> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn count(&self, feedback: Feedback) -> usize {
        self.0.iter().filter(|&&f| f == feedback).count()
    }
}

impl std::ops::Index<usize> for RowResult {
    type Output = Feedback;

    fn index(&self, index: usize) -> &Feedback {
        &self.0[index]
    }
}

impl fmt::Display for RowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feedback in self.iter() {
            write!(f, "{}", feedback.to_char())?;
        }
        Ok(())
    }
}

/// Compare a guess against the secret.
///
/// Exact matches are taken first and removed from both sides; every other
/// guess letter then consumes at most one remaining occurrence in the
/// secret, so repeated letters never score more than the secret holds.
#[must_use]
pub fn evaluate(guess: &Word, secret: &Word) -> RowResult {
    let mut result = [Feedback::Absent; WORD_LENGTH];
    let mut remaining_guess: [Option<u8>; WORD_LENGTH] = guess.letters().map(Some);
    let mut remaining_secret: [Option<u8>; WORD_LENGTH] = secret.letters().map(Some);

    for i in 0..WORD_LENGTH {
        if remaining_guess[i] == remaining_secret[i] {
            result[i] = Feedback::Correct;
            remaining_guess[i] = None;
            remaining_secret[i] = None;
        }
    }

    for (i, letter) in remaining_guess.iter().enumerate() {
        let Some(letter) = letter else { continue };
        if let Some(slot) = remaining_secret
            .iter_mut()
            .find(|slot| **slot == Some(*letter))
        {
            result[i] = Feedback::Present;
            *slot = None;
        }
    }

    RowResult(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Feedback::{Absent, Correct, Present};

    fn eval(guess: &str, secret: &str) -> RowResult {
        evaluate(&Word::new(guess).unwrap(), &Word::new(secret).unwrap())
    }

    #[test]
    fn test_exact_match_is_all_correct() {
        let result = eval("ABCDE", "ABCDE");
        assert_eq!(result, RowResult::WIN);
        assert!(result.is_win());
    }

    #[test]
    fn test_duplicate_letters_consume_once() {
        let result = eval("AABBC", "CBBAA");
        assert_eq!(
            result,
            RowResult::new([Present, Present, Correct, Present, Present])
        );
    }

    #[test]
    fn test_duplicate_counts_match_multiset() {
        // Guess letters can only be credited as often as the secret holds them
        let cases = [
            ("AABBC", "CBBAA"),
            ("SPEED", "ABIDE"),
            ("EERIE", "THEME"),
            ("LLAMA", "HELLO"),
            ("ALLEY", "LEVEL"),
        ];
        for (guess, secret) in cases {
            let result = eval(guess, secret);
            for letter in b'A'..=b'Z' {
                let in_guess = guess.bytes().filter(|&b| b == letter).count();
                let in_secret = secret.bytes().filter(|&b| b == letter).count();
                let credited = guess
                    .bytes()
                    .enumerate()
                    .filter(|&(i, b)| b == letter && result[i] != Absent)
                    .count();
                assert_eq!(
                    credited,
                    in_guess.min(in_secret),
                    "{guess} vs {secret}, letter {}",
                    letter as char
                );
            }
        }
    }

    #[test]
    fn test_correct_takes_priority_over_present() {
        // The last E is exact, leaving one E for the first two to share
        assert_eq!(eval("EERIE", "THEME").to_string(), "YXXXG");
    }

    #[test]
    fn test_present_and_absent() {
        assert_eq!(
            eval("SPEED", "ABIDE"),
            RowResult::new([Absent, Absent, Present, Absent, Present])
        );
        assert_eq!(eval("CRANE", "SLATE").to_string(), "XXGXG");
    }

    #[test]
    fn test_no_common_letters() {
        let result = eval("FUNKY", "CRATE");
        assert_eq!(result.count(Absent), 5);
        assert!(!result.is_win());
    }

    #[test]
    fn test_feedback_char_codes() {
        assert_eq!(Correct.to_char(), 'G');
        assert_eq!(Present.to_char(), 'Y');
        assert_eq!(Absent.to_char(), 'X');
        assert_eq!(eval("SPEED", "ABIDE").to_string(), "XXYXY");
    }
}
