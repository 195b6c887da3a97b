pub mod parser;
pub mod profile;
pub mod source;
pub mod store;

pub use profile::{ProfileBuilder, UserProfile};
pub use source::{load_testing_file, load_training_file, read_records, records_from_str};
pub use store::{
    load_testing, load_training, RatingStore, StoreSummary, TestUser, TestingData, TrainingData,
    UserIndex,
};
