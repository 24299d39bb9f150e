//! Shared stub ports for application tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use sqlfleet_domain::{
    BackupStatus, CheckDbStatus, ConfigValues, DatabaseOptions, FileGrowth, InstanceIdentity,
    RecoveryModel, ServerInfo, Target, TempFile,
};
use sqlfleet_ports::{
    CollectError, CollectResult, InstanceResolver, MetricsProvider,
};

#[derive(Debug, Clone, Copy)]
pub enum StubBehavior {
    /// Every category healthy; all rules come out OK.
    Healthy,
    /// Every call fails as unreachable.
    Unreachable,
    /// Backup history fails as unavailable; everything else healthy.
    BackupsUnavailable,
}

pub struct StubProvider {
    behavior: StubBehavior,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    fn gate(&self) -> CollectResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            StubBehavior::Unreachable => {
                Err(CollectError::Unreachable("connection refused".into()))
            }
            _ => Ok(()),
        }
    }
}

pub fn healthy_server_info() -> ServerInfo {
    ServerInfo {
        product_version: "15.0.4322.2".to_string(),
        edition: "Enterprise Edition".to_string(),
        physical_memory_mb: 32768,
        scheduler_count: 8,
        numa_node_count: 1,
    }
}

#[async_trait]
impl MetricsProvider for StubProvider {
    async fn server_info(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<ServerInfo> {
        self.gate()?;
        Ok(healthy_server_info())
    }

    async fn config_values(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<ConfigValues> {
        self.gate()?;
        Ok(ConfigValues {
            min_server_memory_mb: 1024,
            max_server_memory_mb: 24576,
            max_dop: 8,
            optimize_adhoc: true,
            remote_admin_connections: true,
            backup_compression: Some(true),
        })
    }

    async fn database_options(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<Vec<DatabaseOptions>> {
        self.gate()?;
        Ok(vec![DatabaseOptions {
            name: "sales".to_string(),
            auto_create_stats: true,
            auto_update_stats: true,
            page_verify: "CHECKSUM".to_string(),
            compatibility_level: 150,
            vlf_count: 120,
        }])
    }

    async fn file_growth(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<Vec<FileGrowth>> {
        self.gate()?;
        Ok(vec![FileGrowth {
            database: "sales".to_string(),
            logical_name: "sales_data".to_string(),
            max_size_mb: 102400,
            is_percent_growth: false,
            growth_mb: 512,
        }])
    }

    async fn trace_flags(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<Vec<u32>> {
        self.gate()?;
        Ok(vec![4199, 7745, 12310])
    }

    async fn checkdb_history(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<Vec<CheckDbStatus>> {
        self.gate()?;
        Ok(vec![CheckDbStatus {
            database: "sales".to_string(),
            last_known_good: Utc::now() - ChronoDuration::days(1),
        }])
    }

    async fn backup_history(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<Vec<BackupStatus>> {
        self.gate()?;
        if matches!(self.behavior, StubBehavior::BackupsUnavailable) {
            return Err(CollectError::Unavailable("msdb query denied".into()));
        }
        Ok(vec![BackupStatus {
            database: "sales".to_string(),
            recovery_model: RecoveryModel::Full,
            last_full: Some(Utc::now() - ChronoDuration::days(1)),
            last_log: Some(Utc::now() - ChronoDuration::hours(2)),
        }])
    }

    async fn tempdb_files(
        &self,
        _identity: &InstanceIdentity,
        _timeout: Duration,
    ) -> CollectResult<Vec<TempFile>> {
        self.gate()?;
        Ok((1..=4)
            .map(|index| TempFile {
                logical_name: format!("tempdev{index}"),
                is_data_file: true,
                size_mb: 1024,
            })
            .collect())
    }
}

/// Resolver returning the same instance names for every host, with optional
/// latency and in-flight tracking for concurrency tests.
pub struct StubResolver {
    instances: Vec<String>,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl StubResolver {
    pub fn per_host(instances: Vec<String>) -> Self {
        Self {
            instances,
            delay: Duration::ZERO,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl InstanceResolver for StubResolver {
    async fn resolve(&self, target: &Target) -> Result<Vec<InstanceIdentity>> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(self
            .instances
            .iter()
            .map(|instance| InstanceIdentity::new(target.host.clone(), instance.clone()))
            .collect())
    }
}

/// Resolver that fails for a named host, to exercise worker failure paths.
pub struct FailingResolver {
    pub failing_host: String,
}

#[async_trait]
impl InstanceResolver for FailingResolver {
    async fn resolve(&self, target: &Target) -> Result<Vec<InstanceIdentity>> {
        if target.host == self.failing_host {
            anyhow::bail!("host {} not resolvable", target.host);
        }
        Ok(vec![InstanceIdentity::default_instance(target.host.clone())])
    }
}
