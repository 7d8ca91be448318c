pub mod logging;
pub mod ops;
pub mod pipeline;

pub use logging::init_logging;
pub use ops::{send_connectivity_test, send_test_alert, TestAlertOutcome};
pub use pipeline::{AlertPipeline, PipelineOutcome};
