use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::feature::{FeatureMode, FeatureVector, Vocabulary};
use crate::maxent::category::Category;
use crate::utils::math::softmax::softmax_in_place;

/// Dense row-major matrix, one row per category and one column per
/// vocabulary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl WeightMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap row-major data; `None` if the length does not match the shape
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if rows.checked_mul(cols)? != data.len() {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        if r < self.rows && c < self.cols {
            Some(self.data[r * self.cols + c])
        } else {
            None
        }
    }

    /// Row-major backing data
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Trained maximum-entropy model
///
/// Holds:
/// - the feature `Vocabulary`
/// - the ordered category list
/// - a `[#categories x #vocabulary]` weight matrix
/// - one bias per category
/// - the feature activation mode used in training
///
/// A model is never mutated once built. Share it behind an `Arc` for
/// concurrent classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    vocabulary: Vocabulary,
    categories: Vec<Category>,
    weights: WeightMatrix,
    bias: Vec<f64>,
    feature_mode: FeatureMode,
}

impl Model {
    /// Assemble a model, checking every dimension invariant.
    ///
    /// # Errors
    /// `Error::CorruptModel` when the parts disagree:
    /// - no categories, or duplicate categories
    /// - matrix shape not `[categories x vocabulary]`
    /// - bias length not equal to the category count
    /// - a NaN or infinite weight or bias
    pub fn from_parts(
        vocabulary: Vocabulary,
        categories: Vec<Category>,
        weights: WeightMatrix,
        bias: Vec<f64>,
        feature_mode: FeatureMode,
    ) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::corrupt_model("model declares no categories"));
        }
        let mut seen = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !seen.insert(category) {
                return Err(Error::corrupt_model(format!("duplicate category {:?}", category.as_str())));
            }
        }
        if weights.rows() != categories.len() || weights.cols() != vocabulary.len() {
            return Err(Error::corrupt_model(format!(
                "weight matrix is {}x{}, expected {}x{}",
                weights.rows(),
                weights.cols(),
                categories.len(),
                vocabulary.len()
            )));
        }
        if weights.as_slice().len() != weights.rows() * weights.cols() {
            return Err(Error::corrupt_model(format!(
                "weight matrix holds {} values for {}x{}",
                weights.as_slice().len(),
                weights.rows(),
                weights.cols()
            )));
        }
        if bias.len() != categories.len() {
            return Err(Error::corrupt_model(format!(
                "bias has {} entries, expected {}",
                bias.len(),
                categories.len()
            )));
        }
        if !weights.as_slice().iter().chain(&bias).all(|v| v.is_finite()) {
            return Err(Error::corrupt_model("non-finite weight or bias"));
        }
        Ok(Self {
            vocabulary,
            categories,
            weights,
            bias,
            feature_mode,
        })
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[inline]
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    #[inline]
    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    #[inline]
    pub fn feature_mode(&self) -> FeatureMode {
        self.feature_mode
    }

    pub fn category_index(&self, category: &Category) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Learned weight linking `token` to `category`
    pub fn weight(&self, category: &Category, token: &str) -> Option<f64> {
        let row = self.category_index(category)?;
        let col = self.vocabulary.index_of(token)?;
        self.weights.get(row, col as usize)
    }

    /// Linear score per category: `bias[c] + w[c] . x`
    pub fn scores(&self, features: &FeatureVector) -> Vec<f64> {
        (0..self.categories.len())
            .map(|c| self.bias[c] + features.dot_dense(self.weights.row(c)))
            .collect()
    }

    /// Softmax distribution over categories, in category order
    pub fn probabilities(&self, features: &FeatureVector) -> Vec<f64> {
        let mut scores = self.scores(features);
        softmax_in_place(&mut scores);
        scores
    }

    /// Tokens with the largest weights for `category`, strongest first
    pub fn top_features(&self, category: &Category, n: usize) -> Vec<(&str, f64)> {
        let Some(row) = self.category_index(category) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&str, f64)> = self
            .vocabulary
            .iter()
            .zip(self.weights.row(row).iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
