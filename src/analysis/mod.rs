pub mod normalizer;
pub mod stopwords;

pub use normalizer::{normalize, normalize_to_line};
pub use stopwords::StopWords;
