pub mod correlation;
pub mod matrix;
pub mod pearson;

pub use correlation::CorrelationEngine;
pub use matrix::WeightMatrix;
pub use pearson::{co_rating_sums, pearson, CoRatingSums};
