// Public modules
pub mod types;
pub mod config;
pub mod probe;
pub mod health;
pub mod feedback;
pub mod options;
pub mod values;
pub mod report;
pub mod kubernetes;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use probe::{ProbeRegistry, ProbeRule, ProbeSpec};
pub use health::{evaluate, EvaluationVerdict, HealthError, UnhealthyReason};
pub use feedback::parse_work_status;
pub use options::{config_object_keys, DeploymentIntents, OptionResolver};
pub use values::{compose, ComposeError, Fragments, LoggingValues};
pub use report::ReadinessReport;
pub use kubernetes::fetch_work_feedback;
