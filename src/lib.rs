//! This crate is a tweet sentiment classifier built on a maximum-entropy model.
//!
//! Pipeline: raw text -> `normalize` -> `Vocabulary` / `FeatureVector`
//! -> `Trainer` -> `Model` (-> `store`) -> `classify`.

pub mod analysis;
pub mod classifier;
pub mod corpus;
pub mod error;
pub mod feature;
pub mod maxent;
pub mod store;
pub mod utils;

/// Error type and result alias
/// Every fallible operation returns `tweet_maxent::Result<T>`.
/// - `InsufficientTrainingData`: training without samples
/// - `CorruptModel`: a serialized model that cannot be rebuilt
/// - `InvalidParameter`: a negative or non-finite training rate
/// - `Io`: failures from stopword, corpus or model sources, passed through
pub use error::{Error, Result};

/// Stop Words
/// Lowercase stop token set, loaded from a word list (one token per line).
/// Blank lines are ignored and duplicates collapse.
pub use analysis::StopWords;

/// Text Normalizer
/// Splits text on Unicode word boundaries, lowercases, and drops stop tokens.
/// `normalize_to_line` gives the same tokens joined by spaces.
pub use analysis::{normalize, normalize_to_line};

/// Token Frequency
/// Occurrence counter in first-seen order, the base data for the
/// vocabulary frequency cutoff.
pub use feature::TokenFrequency;

/// Feature extraction
/// - `Vocabulary`: tokens kept after the cutoff, each with a stable index
/// - `FeatureVector`: sparse activation of vocabulary entries in a document
/// - `FeatureMode`: binary presence (default) or occurrence counts
pub use feature::{FeatureMode, FeatureVector, Vocabulary, DEFAULT_CUTOFF};

/// Maximum-Entropy model and trainer
/// `Trainer` runs a fixed number of batch passes and returns an immutable
/// `Model`. Categories are opaque labels discovered from the training data;
/// `Sentiment` is a typed view of the "0"/"1" tweet labels.
pub use maxent::{train, Category, Model, Sentiment, Trainer, TrainingParams, WeightMatrix, DEFAULT_ITERATIONS};

/// Classifier
/// `classify` takes the model explicitly and returns the arg-max category
/// together with the full probability distribution.
/// `Classifier` bundles an `Arc<Model>` with its stopword set for repeated
/// and batch use.
pub use classifier::{classify, Classification, Classifier, Distribution, Evaluation};

/// Labeled corpus document, parsed from `<label>\t<text>` lines
pub use corpus::LabeledDocument;
