use indexmap::IndexSet;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::feature::token::TokenFrequency;

/// Default minimum corpus-wide occurrence count
pub const DEFAULT_CUTOFF: u32 = 2;

/// Vocabulary
/// Ordered set of tokens that survived the frequency cutoff.
/// Each token's position is its stable feature index.
///
/// Built once per training run and never modified afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    tokens: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Build a vocabulary from normalized documents.
    ///
    /// Occurrences are counted across the whole corpus (every occurrence in
    /// every document). Tokens seen at least `min_frequency` times are kept,
    /// indexed in first-seen order. A cutoff of 0 keeps everything, same as 1.
    ///
    /// # Arguments
    /// * `corpus` - normalized token sequences
    /// * `min_frequency` - cutoff
    pub fn build<D, T>(corpus: &[D], min_frequency: u32) -> Self
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut freq = TokenFrequency::new();
        for doc in corpus {
            freq.add_tokens(AsRef::<[T]>::as_ref(doc));
        }
        Self::from_frequency(freq, min_frequency)
    }

    /// Build from precomputed corpus counts
    pub fn from_frequency(mut freq: TokenFrequency, min_frequency: u32) -> Self {
        let removed = freq.remove_tokens_by_condition(|token, &count| {
            let drop = count < min_frequency;
            if drop {
                trace!("cutoff drops {:?} (count {} < {})", token, count, min_frequency);
            }
            drop
        });
        trace!("cutoff removed {} occurrences, {} tokens kept", removed, freq.token_num());
        freq.iter().map(|(token, _)| token).collect()
    }

    /// Vocabulary from an explicit token list.
    /// Repeated tokens keep their first index.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            tokens: tokens.into_iter().map(|t| Box::from(t.as_ref())).collect(),
        }
    }

    #[inline]
    pub fn index_of(&self, token: &str) -> Option<u32> {
        self.tokens.get_index_of(token).map(|i| i as u32)
    }

    #[inline]
    pub fn token(&self, index: u32) -> Option<&str> {
        self.tokens.get_index(index as usize).map(|t| t.as_ref())
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_ref())
    }
}

/// Equal only when both hold the same tokens at the same indices
impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.iter().eq(other.tokens.iter())
    }
}

impl Eq for Vocabulary {}

impl<T: AsRef<str>> FromIterator<T> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}
