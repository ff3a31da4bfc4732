pub mod token;
pub mod vector;
pub mod vocabulary;

pub use token::TokenFrequency;
pub use vector::{FeatureMode, FeatureVector};
pub use vocabulary::{Vocabulary, DEFAULT_CUTOFF};
