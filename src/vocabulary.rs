use crate::error::GameError;
use log::warn;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_VOCABULARY: &str = include_str!("resources/vocabulary.txt");

/// Immutable list of lowercase candidate words, shared by every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from an explicit word list.
    ///
    /// Entries are trimmed and lowercased, blank entries are ignored and
    /// duplicates keep their first position. Any entry that is not made of
    /// letters, or that could never be scrambled, fails the whole list.
    pub fn new<I, S>(words: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for raw in words {
            let word = normalize(raw.as_ref());
            if word.is_empty() {
                continue;
            }
            check_word(&word)?;
            if seen.insert(word.clone()) {
                unique.push(word);
            }
        }
        if unique.is_empty() {
            return Err(GameError::EmptyVocabulary);
        }
        Ok(Self { words: unique })
    }

    /// Skips validation so tests can reach error paths the constructor rules out.
    #[cfg(test)]
    pub(crate) fn unchecked<const N: usize>(words: [&str; N]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

fn distinct_letters(word: &str) -> usize {
    word.chars().collect::<HashSet<_>>().len()
}

/// True when the word has a permutation different from itself.
#[must_use]
pub fn has_scramble(word: &str) -> bool {
    distinct_letters(word) >= 2
}

pub fn check_word(word: &str) -> Result<(), GameError> {
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidWord(word.to_string()));
    }
    if !has_scramble(word) {
        return Err(GameError::UnscramblableWord(word.to_string()));
    }
    Ok(())
}

// Lines that fail validation are skipped rather than failing the load.
fn accept_line(line: &str) -> Option<String> {
    let word = normalize(line);
    if word.is_empty() {
        return None;
    }
    match check_word(&word) {
        Ok(()) => Some(word),
        Err(e) => {
            warn!("Skipping vocabulary entry: {e}");
            None
        }
    }
}

pub fn load_vocabulary_from_str(data: &str) -> Result<Vocabulary, GameError> {
    Vocabulary::new(data.lines().filter_map(accept_line))
}

pub fn load_vocabulary_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vocabulary> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = accept_line(&line?) {
            words.push(word);
        }
    }
    Vocabulary::new(words).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_vocabulary_loads() {
        let vocabulary = load_vocabulary_from_str(EMBEDDED_VOCABULARY).unwrap();
        assert!(vocabulary.len() >= 10);
        assert!(vocabulary.contains("animal"));
        assert!(vocabulary.words().iter().all(|w| has_scramble(w)));
    }

    #[test]
    fn test_load_normalizes_and_dedups() {
        let vocabulary = load_vocabulary_from_str("  Apple\nGRAPE\n\napple\nlemon  \n").unwrap();
        assert_eq!(vocabulary.words(), ["apple", "grape", "lemon"]);
    }

    #[test]
    fn test_load_skips_invalid_lines() {
        let vocabulary = load_vocabulary_from_str("x-ray\naaa\ncat\nb4d\nz\n").unwrap();
        assert_eq!(vocabulary.words(), ["cat"]);
    }

    #[test]
    fn test_load_empty_is_error() {
        assert_eq!(
            load_vocabulary_from_str("\n  \nzzz\n"),
            Err(GameError::EmptyVocabulary)
        );
    }

    #[test]
    fn test_new_rejects_unscramblable_word() {
        assert_eq!(
            Vocabulary::new(["cat", "ooo"]),
            Err(GameError::UnscramblableWord("ooo".to_string()))
        );
    }

    #[test]
    fn test_new_rejects_non_letters() {
        assert_eq!(
            Vocabulary::new(["cat", "x-ray"]),
            Err(GameError::InvalidWord("x-ray".to_string()))
        );
    }

    #[test]
    fn test_has_scramble() {
        assert!(has_scramble("ab"));
        assert!(has_scramble("yoyo"));
        assert!(!has_scramble("a"));
        assert!(!has_scramble("zzzz"));
        assert!(!has_scramble(""));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let path = std::env::temp_dir().join("unscramble_vocabulary_unit_test.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "Zebra").unwrap();
            writeln!(file, "yoga").unwrap();
            writeln!(file, "mm").unwrap();
        }
        let vocabulary = load_vocabulary_from_file(&path).unwrap();
        assert_eq!(vocabulary.words(), ["zebra", "yoga"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        assert!(load_vocabulary_from_file("/nonexistent/unscramble/words.txt").is_err());
    }
}
