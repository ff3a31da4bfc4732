use std::collections::HashSet;
use std::io::BufRead;

use crate::error::Result;

/// Case-normalized stop token set.
///
/// Entries are trimmed and lowercased on insertion, so membership checks
/// against already-lowercased tokens are exact matches.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Build a set from a word list, one token per line.
    /// Blank lines are skipped and duplicates collapse.
    ///
    /// # Arguments
    /// * `lines` - word list lines
    pub fn from_lines<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut stopwords = Self::new();
        for line in lines {
            stopwords.insert(line.as_ref());
        }
        stopwords
    }

    /// Read a word list from any line source.
    /// I/O failures are returned unchanged.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut stopwords = Self::new();
        for line in reader.lines() {
            stopwords.insert(&line?);
        }
        Ok(stopwords)
    }

    /// Insert a single word.
    /// Returns false for blank input or an already present word.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word.to_lowercase().into_boxed_str())
    }

    /// `token` is expected to be lowercase already
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_ref())
    }
}

impl<T: AsRef<str>> FromIterator<T> for StopWords {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}
