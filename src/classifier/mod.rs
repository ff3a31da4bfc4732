pub mod evaluate;

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::{normalize, StopWords};
use crate::feature::FeatureVector;
use crate::maxent::{Category, Model, Sentiment};
use crate::utils::math::softmax::argmax;

pub use evaluate::Evaluation;

/// Probability per category, in the model's category order
#[derive(Clone, PartialEq)]
pub struct Distribution {
    pub list: Vec<(Category, f64)>,
}

impl Distribution {
    pub fn new(list: Vec<(Category, f64)>) -> Self {
        Distribution { list }
    }

    /// Probability of `category`, `None` if the model does not know it
    pub fn get(&self, category: &Category) -> Option<f64> {
        self.list.iter().find(|(c, _)| c == category).map(|(_, p)| *p)
    }

    /// Most probable entry; ties resolve to the first-declared category
    pub fn best(&self) -> Option<(&Category, f64)> {
        let probs: Vec<f64> = self.list.iter().map(|(_, p)| *p).collect();
        argmax(&probs).map(|i| (&self.list[i].0, self.list[i].1))
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.list.iter().map(|(c, p)| (c, *p))
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Distribution [")?;
            for (category, p) in &self.list {
                writeln!(f, "    {:?}: {:.6}", category.as_str(), p)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (category, p) in &self.list {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={:.4}", category, p)?;
            first = false;
        }
        Ok(())
    }
}

/// Result of classifying one document
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// arg-max category
    pub category: Category,
    /// full distribution over the model's categories
    pub distribution: Distribution,
}

impl Classification {
    /// Probability of the chosen category
    pub fn confidence(&self) -> f64 {
        self.distribution.get(&self.category).unwrap_or(0.0)
    }

    /// Typed view for the "0"/"1" tweet labels
    pub fn sentiment(&self) -> Option<Sentiment> {
        Sentiment::from_category(&self.category)
    }
}

/// Classify one document against `model`.
///
/// `stopwords` must be the set the model was trained with; the model does
/// not keep it. Documents with no known token (including empty ones) get the
/// bias-only distribution.
pub fn classify(model: &Model, document: &str, stopwords: &StopWords) -> Classification {
    let tokens = normalize(document, stopwords);
    let features = FeatureVector::extract(&tokens, model.vocabulary(), model.feature_mode());
    classify_features(model, &features)
}

/// Classify an already extracted feature vector
pub fn classify_features(model: &Model, features: &FeatureVector) -> Classification {
    let probs = model.probabilities(features);
    // a model always has at least one category
    let best = argmax(&probs).unwrap_or(0);
    let distribution = Distribution::new(
        model
            .categories()
            .iter()
            .cloned()
            .zip(probs)
            .collect(),
    );
    Classification {
        category: model.categories()[best].clone(),
        distribution,
    }
}

/// Classifier
/// Pairs a shared trained model with the stopword set it was trained with.
///
/// Cheap to clone; clones share the same `Model`.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: Arc<Model>,
    stopwords: StopWords,
}

impl Classifier {
    pub fn new(model: Arc<Model>, stopwords: StopWords) -> Self {
        Self { model, stopwords }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    pub fn classify(&self, document: &str) -> Classification {
        classify(&self.model, document, &self.stopwords)
    }

    /// Classify many documents in parallel; output order matches input
    pub fn classify_batch<T>(&self, documents: &[T]) -> Vec<Classification>
    where
        T: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.classify(doc.as_ref()))
            .collect()
    }

    /// Sentiment of a tweet, `None` if the model's labels are not "0"/"1"
    pub fn predict_sentiment(&self, document: &str) -> Option<Sentiment> {
        self.classify(document).sentiment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureMode, Vocabulary};
    use crate::maxent::WeightMatrix;

    fn model() -> Model {
        let vocab = Vocabulary::from_tokens(["great", "awful"]);
        let weights = WeightMatrix::from_row_major(2, 2, vec![2.0, -2.0, -2.0, 2.0]).unwrap();
        Model::from_parts(
            vocab,
            vec![Category::from("1"), Category::from("0")],
            weights,
            vec![0.0, 0.0],
            FeatureMode::Presence,
        )
        .unwrap()
    }

    #[test]
    fn picks_argmax_category() {
        let sw = StopWords::new();
        let m = model();
        assert_eq!(classify(&m, "What a GREAT movie", &sw).category, Category::from("1"));
        assert_eq!(classify(&m, "awful, just awful", &sw).category, Category::from("0"));
    }

    #[test]
    fn distribution_is_valid() {
        let sw = StopWords::new();
        let m = model();
        for doc in ["great", "awful great", "", "nothing known here"] {
            let result = classify(&m, doc, &sw);
            assert_eq!(result.distribution.len(), 2);
            let total: f64 = result.distribution.iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-6);
            assert!(result.distribution.iter().all(|(_, p)| p >= 0.0));
        }
    }

    #[test]
    fn tie_goes_to_first_declared_category() {
        let result = classify(&model(), "", &StopWords::new());
        assert_eq!(result.category, Category::from("1"));
        assert!((result.confidence() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn stopwords_hide_features() {
        let sw = StopWords::from_lines(["great"]);
        let result = classify(&model(), "great", &sw);
        assert_eq!(result.distribution.get(&Category::from("1")), Some(0.5));
    }

    #[test]
    fn batch_keeps_input_order() {
        let classifier = Classifier::new(Arc::new(model()), StopWords::new());
        let out = classifier.classify_batch(&["awful", "great", "awful"]);
        let cats: Vec<&str> = out.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(cats, vec!["0", "1", "0"]);
        assert_eq!(classifier.predict_sentiment("great"), Some(Sentiment::Positive));
    }

    #[test]
    fn display_and_debug() {
        let result = classify(&model(), "", &StopWords::new());
        assert_eq!(result.distribution.to_string(), "1=0.5000 0=0.5000");
        let pretty = format!("{:#?}", result.distribution);
        assert!(pretty.starts_with("Distribution ["));
    }
}
