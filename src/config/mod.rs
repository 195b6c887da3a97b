pub mod settings;

pub use settings::{AppConfig, DataSettings, PredictionSettings, ReportFormat, ReportSettings};
