//! Domain models and invariants.

pub mod config;
pub mod instance;
pub mod policy;
pub mod report;
pub mod snapshot;
pub mod target;
pub mod version;

pub use config::{CollectionConfig, FleetConfig, NamingConfig, OutputConfig, SqlcmdConfig};
pub use instance::InstanceIdentity;
pub use policy::evaluate_snapshot;
pub use report::{
    AssessmentRun, InstanceReport, Rule, RuleStatus, RuleTally, RuleVerdict, RULE_ORDER,
};
pub use snapshot::{
    BackupStatus, CheckDbStatus, Collected, ConfigValues, DatabaseOptions, FileGrowth,
    InstanceSnapshot, RecoveryModel, ServerInfo, TempFile, MAX_MEMORY_UNLIMITED_MB,
};
pub use target::Target;
pub use version::EngineVersion;
