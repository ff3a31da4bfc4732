pub mod category;
pub mod model;
pub mod params;
pub mod trainer;

pub use category::{Category, Sentiment};
pub use model::{Model, WeightMatrix};
pub use params::{TrainingParams, DEFAULT_ITERATIONS};
pub use trainer::{train, Trainer};
