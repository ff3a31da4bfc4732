use log::{debug, info};
use rayon::prelude::*;

use crate::analysis::{normalize, StopWords};
use crate::corpus::LabeledDocument;
use crate::error::{Error, Result};
use crate::feature::{FeatureVector, Vocabulary};
use crate::maxent::category::Category;
use crate::maxent::model::{Model, WeightMatrix};
use crate::maxent::params::TrainingParams;
use crate::utils::math::softmax::softmax_in_place;

/// Maximum-entropy trainer
///
/// Fits one weight per (category, feature) plus one bias per category by
/// batch gradient ascent on the mean conditional log-likelihood.
///
/// Each pass:
/// 1. computes every sample's distribution with the weights frozen
///    (parallel, collected in corpus order)
/// 2. accumulates model expectations sequentially in corpus order
/// 3. moves every weight by `(lr / C) * (empirical - model) / N`
///
/// `C` is the GIS correction constant: the largest total activation of any
/// sample, bias included. Exactly `iterations` passes run; the result is
/// bit-identical however many threads rayon uses.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    params: TrainingParams,
}

impl Trainer {
    pub fn new(params: TrainingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    /// Train straight from labeled raw documents.
    ///
    /// Documents are normalized with `stopwords`; the cutoff is applied to
    /// that normalized token stream.
    pub fn train_documents(&self, docs: &[LabeledDocument], stopwords: &StopWords) -> Result<Model> {
        if docs.is_empty() {
            return Err(Error::insufficient_training_data("no training documents"));
        }
        let tokenized: Vec<Vec<String>> = docs
            .par_iter()
            .map(|doc| normalize(&doc.text, stopwords))
            .collect();
        let vocabulary = Vocabulary::build(&tokenized, self.params.cutoff);

        let samples: Vec<(FeatureVector, Category)> = tokenized
            .iter()
            .zip(docs)
            .map(|(tokens, doc)| {
                (
                    FeatureVector::extract(tokens, &vocabulary, self.params.feature_mode),
                    doc.label.clone(),
                )
            })
            .collect();

        self.train(&samples, vocabulary)
    }

    /// Train on already extracted samples.
    ///
    /// Feature indices must refer to `vocabulary`; indices past its end
    /// carry no weight and are ignored.
    ///
    /// # Errors
    /// - `Error::InvalidParameter` for a negative or non-finite rate
    /// - `Error::InsufficientTrainingData` if `samples` is empty
    pub fn train(&self, samples: &[(FeatureVector, Category)], vocabulary: Vocabulary) -> Result<Model> {
        self.params.validate()?;
        if samples.is_empty() {
            return Err(Error::insufficient_training_data("no training samples"));
        }

        let mut categories: Vec<Category> = Vec::new();
        let labels: Vec<usize> = samples
            .iter()
            .map(|(_, label)| match categories.iter().position(|c| c == label) {
                Some(i) => i,
                None => {
                    categories.push(label.clone());
                    categories.len() - 1
                }
            })
            .collect();
        if categories.is_empty() {
            return Err(Error::insufficient_training_data("no categories in training samples"));
        }

        let n_cat = categories.len();
        let n_feat = vocabulary.len();
        let n = samples.len() as f64;

        info!(
            "training maxent: {} samples, {} features, {} categories, {} passes",
            samples.len(),
            n_feat,
            n_cat,
            self.params.iterations
        );

        // empirical expectations are fixed for the whole run
        let mut empirical = WeightMatrix::zeros(n_cat, n_feat);
        let mut empirical_bias = vec![0.0; n_cat];
        for ((features, _), &label) in samples.iter().zip(&labels) {
            empirical_bias[label] += 1.0;
            let row = empirical.row_mut(label);
            for (idx, val) in features.iter() {
                if let Some(slot) = row.get_mut(idx as usize) {
                    *slot += val;
                }
            }
        }

        let correction = samples
            .iter()
            .map(|(features, _)| in_range_activation(features, n_feat) + 1.0)
            .fold(1.0, f64::max);
        let step = self.params.learning_rate / correction;
        let decay = self.params.learning_rate * self.params.l2;

        let mut weights = WeightMatrix::zeros(n_cat, n_feat);
        let mut bias = vec![0.0; n_cat];

        for pass in 0..self.params.iterations {
            let distributions: Vec<Vec<f64>> = samples
                .par_iter()
                .map(|(features, _)| distribution(&weights, &bias, features))
                .collect();

            let mut expected = WeightMatrix::zeros(n_cat, n_feat);
            let mut expected_bias = vec![0.0; n_cat];
            let mut log_likelihood = 0.0;
            for (((features, _), &label), probs) in samples.iter().zip(&labels).zip(&distributions) {
                log_likelihood += probs[label].ln();
                for (c, &p) in probs.iter().enumerate() {
                    expected_bias[c] += p;
                    let row = expected.row_mut(c);
                    for (idx, val) in features.iter() {
                        if let Some(slot) = row.get_mut(idx as usize) {
                            *slot += p * val;
                        }
                    }
                }
            }

            for c in 0..n_cat {
                let b = bias[c];
                bias[c] = b + step * (empirical_bias[c] - expected_bias[c]) / n - decay * b;
                let emp = empirical.row(c);
                let exp = expected.row(c);
                let row = weights.row_mut(c);
                for f in 0..n_feat {
                    let w = row[f];
                    row[f] = w + step * (emp[f] - exp[f]) / n - decay * w;
                }
            }

            debug!(
                "pass {}/{}: mean log-likelihood {:.6}",
                pass + 1,
                self.params.iterations,
                log_likelihood / n
            );
        }

        info!("training finished: categories {:?}", categories);
        Model::from_parts(vocabulary, categories, weights, bias, self.params.feature_mode)
    }
}

/// Train with explicit params, see [`Trainer::train`]
pub fn train(samples: &[(FeatureVector, Category)], vocabulary: Vocabulary, params: &TrainingParams) -> Result<Model> {
    Trainer::new(params.clone()).train(samples, vocabulary)
}

fn distribution(weights: &WeightMatrix, bias: &[f64], features: &FeatureVector) -> Vec<f64> {
    let mut scores: Vec<f64> = (0..bias.len())
        .map(|c| bias[c] + features.dot_dense(weights.row(c)))
        .collect();
    softmax_in_place(&mut scores);
    scores
}

fn in_range_activation(features: &FeatureVector, n_feat: usize) -> f64 {
    features
        .iter()
        .filter(|(idx, _)| (*idx as usize) < n_feat)
        .map(|(_, val)| val.abs())
        .sum()
}
