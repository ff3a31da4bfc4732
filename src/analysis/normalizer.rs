//! Text normalization.
//!
//! Raw text goes through three steps:
//! - segmentation on Unicode word boundaries (UAX #29)
//! - lowercasing
//! - stop token removal
//!
//! Punctuation and whitespace only delimit words and never become tokens.
//! In-word apostrophes are kept (`everybody's` is one token).

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::stopwords::StopWords;

/// Normalize `text` into its canonical token sequence.
///
/// # Arguments
/// * `text` - raw document text
/// * `stopwords` - lowercase stop token set
///
/// # Returns
/// * `Vec<String>` - tokens in original order, duplicates kept.
///   Empty when the text has no word tokens.
pub fn normalize(text: &str, stopwords: &StopWords) -> Vec<String> {
    text.unicode_words()
        .map(|word| word.to_lowercase())
        .filter(|token| !stopwords.contains(token))
        .collect()
}

/// Normalized tokens joined by single spaces.
/// This is the "filtered line" form of a document.
pub fn normalize_to_line(text: &str, stopwords: &StopWords) -> String {
    normalize(text, stopwords).join(" ")
}
