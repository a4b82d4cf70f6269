use crate::word::Word;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Parse a newline-delimited word list.
///
/// Lines are trimmed and uppercased; anything that is not five ASCII
/// letters is skipped. Duplicates are kept out while preserving order.
pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    collect_words(data.lines().map(str::to_owned))
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
    Ok(collect_words(lines))
}

fn collect_words<I: IntoIterator<Item = String>>(lines: I) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut seen: HashSet<Word> = HashSet::new();
    for line in lines {
        if let Ok(word) = Word::new(line.trim())
            && seen.insert(word)
        {
            words.push(word);
        }
    }
    words
}
