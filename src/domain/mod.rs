pub mod models;

pub use models::{ItemId, PredictionOutcome, RatingRecord, RatingValue, UserId};
