pub mod config;
pub mod report;
pub mod runner;

pub use config::{ConfigError, ScenarioConfig, TelemetryConfig};
pub use report::{AttackFlags, AttackRecord, DuelReport, DuelStatus, DuelSummary, ScenarioInfo};
pub use runner::{discover_scenarios, run_scenario, run_scenario_file, RunOptions};
