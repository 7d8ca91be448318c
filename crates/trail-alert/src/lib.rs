pub mod catalog;
pub mod evaluator;
pub mod model;
pub mod priority;
pub mod thresholds;

pub use catalog::{catalog, random_alert};
pub use evaluator::{evaluate, HazardCheck, HazardEvaluator};
pub use model::{Alert, Category, Hazard, Severity};
pub use priority::{pick_most_severe, rank_of_label, sort_by_severity};
