//! Port traits between the application core and the outside world.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use sqlfleet_domain::{
    AssessmentRun, BackupStatus, CheckDbStatus, ConfigValues, DatabaseOptions, FileGrowth,
    InstanceIdentity, ServerInfo, Target, TempFile,
};

/// Failure of one metrics call. The two variants drive different recovery:
/// an unreachable instance is skipped entirely, an unavailable category
/// degrades to empty input for the rules.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("instance unreachable: {0}")]
    Unreachable(String),
    #[error("category unavailable: {0}")]
    Unavailable(String),
}

impl CollectError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, CollectError::Unreachable(_))
    }
}

pub type CollectResult<T> = std::result::Result<T, CollectError>;

/// Raw metric snapshots for one instance, one operation per category. Each
/// call is bounded by `timeout`; no category failure may prevent the others
/// from being attempted.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn server_info(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<ServerInfo>;

    async fn config_values(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<ConfigValues>;

    async fn database_options(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<DatabaseOptions>>;

    async fn file_growth(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<FileGrowth>>;

    async fn trace_flags(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<u32>>;

    async fn checkdb_history(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<CheckDbStatus>>;

    async fn backup_history(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<BackupStatus>>;

    async fn tempdb_files(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<TempFile>>;
}

/// Expands one target host into the instances to assess.
#[async_trait]
pub trait InstanceResolver: Send + Sync {
    async fn resolve(&self, target: &Target) -> Result<Vec<InstanceIdentity>>;
}

/// Ordered target list; duplicates are tolerated and deduplicated
/// downstream.
pub trait TargetSource: Send + Sync {
    fn load(&self) -> Result<Vec<Target>>;
}

/// Durable output for a finished run.
pub trait ReportSink: Send + Sync {
    fn export(&self, run: &AssessmentRun) -> Result<()>;
}

/// Sink that drops the run. Useful for wiring and tests.
#[derive(Debug, Clone, Default)]
pub struct NullReportSink;

impl ReportSink for NullReportSink {
    fn export(&self, _run: &AssessmentRun) -> Result<()> {
        Ok(())
    }
}

/// Resolver that maps every target to its default instance only.
#[derive(Debug, Clone, Default)]
pub struct DefaultInstanceResolver {
    pub use_fqdn: bool,
}

#[async_trait]
impl InstanceResolver for DefaultInstanceResolver {
    async fn resolve(&self, target: &Target) -> Result<Vec<InstanceIdentity>> {
        Ok(vec![InstanceIdentity::default_instance(
            target.address(self.use_fqdn),
        )])
    }
}
