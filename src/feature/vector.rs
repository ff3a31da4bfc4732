use serde::{Deserialize, Serialize};

use crate::feature::vocabulary::Vocabulary;

/// How a vocabulary token present in a document is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureMode {
    /// 1.0 if the token occurs at least once
    #[default]
    Presence,
    /// number of occurrences
    Count,
}

/// Sparse feature vector
/// Indices are sorted ascending and unique; every stored value is non-zero.
/// An empty vector is the all-zero document (every token out of vocabulary).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    inds: Vec<u32>,
    vals: Vec<f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Map normalized tokens onto `vocab`.
    /// Unknown tokens are ignored.
    ///
    /// # Arguments
    /// * `tokens` - normalized tokens of one document
    /// * `vocab` - feature vocabulary
    /// * `mode` - presence or count activation
    pub fn extract<T>(tokens: &[T], vocab: &Vocabulary, mode: FeatureMode) -> Self
    where
        T: AsRef<str>,
    {
        let mut inds: Vec<u32> = tokens
            .iter()
            .filter_map(|t| vocab.index_of(t.as_ref()))
            .collect();
        inds.sort_unstable();

        let mut vec = Self::new();
        for idx in inds {
            match vec.inds.last() {
                Some(&last) if last == idx => {
                    if mode == FeatureMode::Count {
                        if let Some(v) = vec.vals.last_mut() {
                            *v += 1.0;
                        }
                    }
                }
                _ => {
                    vec.inds.push(idx);
                    vec.vals.push(1.0);
                }
            }
        }
        vec
    }

    /// Build from arbitrary `(index, value)` pairs.
    /// Pairs are sorted, duplicate indices summed and zeros dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut pairs: Vec<(u32, f64)> = pairs.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vec = Self::new();
        for (idx, val) in pairs {
            if vec.inds.last() == Some(&idx) {
                if let Some(v) = vec.vals.last_mut() {
                    *v += val;
                }
            } else {
                vec.inds.push(idx);
                vec.vals.push(val);
            }
        }
        vec.retain_non_zero();
        vec
    }

    fn retain_non_zero(&mut self) {
        let mut w = 0;
        for r in 0..self.inds.len() {
            if self.vals[r] != 0.0 {
                self.inds[w] = self.inds[r];
                self.vals[w] = self.vals[r];
                w += 1;
            }
        }
        self.inds.truncate(w);
        self.vals.truncate(w);
    }

    /// Number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at `index`, 0.0 when absent
    pub fn get(&self, index: u32) -> f64 {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Sum of all activations
    #[inline]
    pub fn activation_sum(&self) -> f64 {
        self.vals.iter().sum()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    /// Dot product with a dense row.
    /// Indices past the end of `dense` contribute nothing.
    #[inline]
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        let mut result = 0.0;
        for (idx, val) in self.iter() {
            if let Some(w) = dense.get(idx as usize) {
                result += w * val;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::from_tokens(["great", "awful", "day", "movie"])
    }

    #[test]
    fn presence_mode_is_binary() {
        let fv = FeatureVector::extract(&["day", "great", "great", "day"], &vocab(), FeatureMode::Presence);
        let pairs: Vec<(u32, f64)> = fv.iter().collect();
        assert_eq!(pairs, vec![(0, 1.0), (2, 1.0)]);
    }

    #[test]
    fn count_mode_counts() {
        let fv = FeatureVector::extract(&["day", "great", "great", "day", "day"], &vocab(), FeatureMode::Count);
        assert_eq!(fv.get(0), 2.0);
        assert_eq!(fv.get(2), 3.0);
        assert_eq!(fv.get(1), 0.0);
        assert_eq!(fv.activation_sum(), 5.0);
    }

    #[test]
    fn unknown_tokens_are_dropped() {
        let fv = FeatureVector::extract(&["nice", "great", "unknown"], &vocab(), FeatureMode::Presence);
        assert_eq!(fv.nnz(), 1);
        assert_eq!(fv.get(0), 1.0);
    }

    #[test]
    fn all_unknown_is_empty() {
        let fv = FeatureVector::extract(&["have", "nice"], &vocab(), FeatureMode::Presence);
        assert!(fv.is_empty());
        assert_eq!(fv.activation_sum(), 0.0);
        assert_eq!(fv.dot_dense(&[1.0, 2.0, 3.0, 4.0]), 0.0);
    }

    #[test]
    fn indices_sorted_and_unique() {
        let fv = FeatureVector::extract(&["movie", "awful", "movie", "great"], &vocab(), FeatureMode::Count);
        let inds: Vec<u32> = fv.iter().map(|(i, _)| i).collect();
        assert_eq!(inds, vec![0, 1, 3]);
    }

    #[test]
    fn from_pairs_merges_and_drops_zero() {
        let fv = FeatureVector::from_pairs(vec![(5, 1.0), (1, 2.0), (5, 0.5), (3, 0.0)]);
        let pairs: Vec<(u32, f64)> = fv.iter().collect();
        assert_eq!(pairs, vec![(1, 2.0), (5, 1.5)]);
    }

    #[test]
    fn dot_products() {
        let a = FeatureVector::from_pairs(vec![(0, 1.0), (2, 2.0), (4, 3.0)]);
        let b = FeatureVector::from_pairs(vec![(2, 4.0), (3, 1.0), (4, 1.0)]);
        assert_eq!(a.dot_dense(&[1.0, 1.0, 1.0]), 3.0);
        assert_eq!(b.dot_dense(&[0.0, 0.0, 0.5, 2.0, 1.0]), 5.0);
    }
}
