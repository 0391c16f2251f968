pub mod components;
pub mod config;
pub mod predicate;
pub mod threshold;

pub use components::{extract_components, Component};
pub use config::{DetectionConfig, ThresholdMode};
pub use predicate::Qualifier;
pub use threshold::compute_threshold;
