pub mod evaluation;
pub mod query;

pub use evaluation::EvaluationService;
pub use query::QueryService;
