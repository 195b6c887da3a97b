pub mod metrics;
pub mod report;

pub use metrics::{compute_metrics, ErrorMetrics};
pub use report::{format_score, EvaluationReport, StageTiming};
