use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::path::Path;

use smallvec::SmallVec;

use crate::error::ParseError;
use crate::MAX_SLOT_LENGTH;

/// An identifier for a given word, based on its index in the WordList's `words` field.
pub type WordId = usize;

/// A struct representing a word that can be chosen for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub chars: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let chars = string.chars().collect();
        Word { string, chars }
    }

    /// Length in letters, which is what gets compared against slot lengths.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// The candidate words for a fill. Words are upper-cased and deduplicated, keeping the order in
/// which they first appeared, so each distinct word has exactly one `WordId`.
#[derive(Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
}

impl Debug for WordList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordList")
            .field("words", &(["(", &self.words.len().to_string(), " entries)"].join("")))
            .finish()
    }
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut result = WordList::default();

        for word in words {
            let normalized = word.as_ref().trim().to_uppercase();
            if normalized.is_empty() || seen.contains(&normalized) {
                continue;
            }
            seen.insert(normalized.clone());
            result.words.push(Word::new(normalized));
        }

        result
    }

    /// Parse a word list with one word per line.
    pub fn parse(contents: &str) -> WordList {
        WordList::from_words(contents.lines())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<WordList, ParseError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(WordList::parse(&contents))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }

    /// Find the id of a word, ignoring case.
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        let normalized = word.trim().to_uppercase();
        self.words.iter().position(|candidate| candidate.string == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_normalized_and_deduplicated() {
        let words = WordList::parse("six\nSEVEN\n\n  Six \nONE\r\nseven\n");

        assert_eq!(words.len(), 3);
        assert_eq!(words.word(0).string, "SIX");
        assert_eq!(words.word(1).string, "SEVEN");
        assert_eq!(words.word(2).string, "ONE");
        assert_eq!(words.id_of("one"), Some(2));
        assert_eq!(words.id_of("two"), None);
    }

    #[test]
    fn test_length_counts_letters() {
        let words = WordList::from_words(["café", "word"]);

        assert_eq!(words.word(0).len(), 4);
        assert_eq!(words.word(0).chars[3], 'É');
        assert_eq!(words.word(1).len(), 4);
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "alpha\nbeta\n").unwrap();

        let words = WordList::load(&path).unwrap();

        assert_eq!(words.len(), 2);
        assert!(matches!(
            WordList::load(dir.path().join("missing.txt")),
            Err(ParseError::Io(_))
        ));
    }
}
