// Integration tests for the wordle-game application
// These tests play whole games through the line interface

use chrono::NaiveDate;
use std::io::Cursor;
use wordle_game::cli::CliInterface;
use wordle_game::service::puzzle_epoch;
use wordle_game::*;

fn word(text: &str) -> Word {
    Word::new(text).unwrap()
}

fn service(words: &[&str]) -> LocalWordService {
    LocalWordService::new(words.iter().map(|w| word(w)).collect()).unwrap()
}

fn fixed_service(secret: &str) -> LocalWordService {
    service(&["CRANE", "SLATE", "RAISE", "STARE", "AROSE", "TRACE", "ABIDE", "SPEED"])
        .with_fixed_word(word(secret))
}

/// Play `input` against `service` and return the finished games and the
/// printed output.
fn play(service: &dyn WordService, input: &str, puzzle: NaiveDate) -> (Vec<GameRecord>, String) {
    let mut interface = CliInterface::new(Cursor::new(input), Vec::new());
    let records = game_loop(service, &mut interface, puzzle);
    let output = String::from_utf8(interface.into_writer()).unwrap();
    (records, output)
}

#[test]
fn test_win_on_first_guess() {
    let service = fixed_service("SLATE");
    let (records, output) = play(&service, "slate\n", puzzle_epoch());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, Outcome::Won);
    assert_eq!(records[0].guesses, 1);
    assert!(output.contains("1. SLATE  GGGGG"));
    assert!(output.contains("Solved in 1/6!"));
    assert!(output.trim_end().ends_with("Exiting."));
}

#[test]
fn test_win_after_misses() {
    let service = fixed_service("SLATE");
    let (records, output) = play(&service, "CRANE\nSTARE\nSLATE\n", puzzle_epoch());

    assert_eq!(records[0].guesses, 3);
    assert!(output.contains("1. CRANE  XXGXG"));
    assert!(output.contains("2. STARE  GYGXG"));
    assert!(output.contains("3. SLATE  GGGGG"));
    assert!(output.contains("Solved in 3/6!"));
}

#[test]
fn test_six_misses_lose_and_reveal_secret() {
    let service = fixed_service("SLATE");
    let input = "CRANE\nRAISE\nSTARE\nAROSE\nTRACE\nABIDE\n";
    let (records, output) = play(&service, input, puzzle_epoch());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, Outcome::Lost);
    assert_eq!(records[0].guesses, MAX_GUESSES);
    assert!(output.contains("Out of guesses. The word was SLATE."));
}

#[test]
fn test_input_after_game_over_is_not_played() {
    let service = fixed_service("SLATE");
    let (records, output) = play(&service, "SLATE\nCRANE\n", puzzle_epoch());

    assert_eq!(records.len(), 1);
    assert!(!output.contains("CRANE  "));
    assert!(output.contains("Type 'next' for the next puzzle"));
}

#[test]
fn test_short_guess_is_a_noop() {
    let service = fixed_service("SLATE");
    let (records, output) = play(&service, "CRAN\nSLATE\n", puzzle_epoch());

    assert!(output.contains("Guess must be exactly 5 letters!"));
    // The short guess did not use up a row
    assert_eq!(records[0].guesses, 1);
}

#[test]
fn test_unknown_word_does_not_use_a_row() {
    let service = fixed_service("SLATE");
    let (records, output) = play(&service, "ZZZZZ\nSLATE\n", puzzle_epoch());

    assert!(output.contains("ZZZZZ is not in the word list."));
    assert_eq!(records[0].guesses, 1);
    assert!(output.contains("1. SLATE  GGGGG"));
}

#[test]
fn test_duplicate_letter_feedback() {
    let service = service(&["ABIDE", "SPEED"]).with_fixed_word(word("ABIDE"));
    let (_, output) = play(&service, "SPEED\nexit\n", puzzle_epoch());
    assert!(output.contains("1. SPEED  XXYXY"));
}

#[test]
fn test_new_game_plays_next_days_word() {
    let service = service(&["CRANE", "SLATE", "RAISE"]);
    // Puzzle zero is CRANE, the next day is SLATE
    let (records, output) = play(&service, "CRANE\nnext\nSLATE\n", puzzle_epoch());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].secret, word("CRANE"));
    assert_eq!(records[1].secret, word("SLATE"));
    assert_eq!(records[1].puzzle, puzzle_epoch().succ_opt().unwrap());
    assert!(output.contains("Puzzle #0"));
    assert!(output.contains("Puzzle #1"));
}

#[test]
fn test_abandoned_game_is_not_recorded() {
    let service = fixed_service("SLATE");
    let (records, output) = play(&service, "CRANE\nexit\n", puzzle_epoch());

    assert!(records.is_empty());
    assert!(output.contains("1. CRANE  XXGXG"));
}

#[test]
fn test_word_of_the_day_depends_on_date() {
    let service = service(&["CRANE", "SLATE", "RAISE"]);
    let day_two = NaiveDate::from_ymd_opt(2021, 6, 21).unwrap();
    let (records, _) = play(&service, "RAISE\n", day_two);
    assert_eq!(records[0].secret, word("RAISE"));
    assert_eq!(records[0].outcome, Outcome::Won);
}

struct OfflineService;

impl WordService for OfflineService {
    fn word_of_the_day(&self, _date: NaiveDate) -> Result<Word, WordServiceError> {
        Err(WordServiceError::Unavailable("network is down".to_string()))
    }

    fn is_valid_word(&self, _word: &Word) -> Result<bool, WordServiceError> {
        Err(WordServiceError::Unavailable("network is down".to_string()))
    }
}

#[test]
fn test_fetch_failure_stalls_game() {
    let (records, output) = play(&OfflineService, "CRANE\nexit\n", puzzle_epoch());

    assert!(records.is_empty());
    assert!(output.contains(
        "Could not fetch the word of the day: word service unavailable: network is down"
    ));
    assert!(output.contains("No puzzle loaded"));
    assert!(!output.contains("1. CRANE"));
}

/// Hands out a fixed secret but cannot validate guesses.
struct NoDictionaryService;

impl WordService for NoDictionaryService {
    fn word_of_the_day(&self, _date: NaiveDate) -> Result<Word, WordServiceError> {
        Ok(Word::new("SLATE").unwrap())
    }

    fn is_valid_word(&self, _word: &Word) -> Result<bool, WordServiceError> {
        Err(WordServiceError::Unavailable("timed out".to_string()))
    }
}

#[test]
fn test_validation_failure_stalls_row() {
    let mut interface = CliInterface::new(Cursor::new("CRANE\n\nSLATE\n"), Vec::new());
    let records = game_loop(&NoDictionaryService, &mut interface, puzzle_epoch());
    let output = String::from_utf8(interface.into_writer()).unwrap();

    // Both attempts at CRANE fail without using a row; the secret still wins
    let failures = output
        .matches("Could not check the word: word service unavailable: timed out")
        .count();
    assert_eq!(failures, 2);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].guesses, 1);
}

#[test]
fn test_embedded_wordbank_game() {
    let service = LocalWordService::new(load_wordbank_from_str(EMBEDDED_WORDBANK)).unwrap();
    let secret = service.word_of_the_day(puzzle_epoch()).unwrap();
    let input = format!("{secret}\n");
    let (records, _) = play(&service, &input, puzzle_epoch());
    assert_eq!(records[0].secret, secret);
    assert_eq!(records[0].outcome, Outcome::Won);
}

#[test]
fn test_custom_wordbank_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let path = std::env::temp_dir().join("wordle_game_custom_wordbank.txt");
    {
        let mut file = File::create(&path).unwrap();
        writeln!(file, "apple").unwrap();
        writeln!(file, "grape").unwrap();
        writeln!(file, "lemon").unwrap();
        writeln!(file, "melon").unwrap();
    }

    let words = load_wordbank_from_file(&path).unwrap();
    assert_eq!(words.len(), 4);
    let service = LocalWordService::new(words).unwrap().with_fixed_word(word("MELON"));
    let (records, output) = play(&service, "LEMON\nMELON\n", puzzle_epoch());

    assert!(output.contains("1. LEMON  YGYGG"));
    assert_eq!(records[0].guesses, 2);

    let _ = std::fs::remove_file(&path);
}
