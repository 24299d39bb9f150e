use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// `max server memory` value meaning "no limit configured".
pub const MAX_MEMORY_UNLIMITED_MB: u64 = 2_147_483_647;

/// Presence wrapper for one metric category. A category whose collection
/// failed degrades to `Unavailable` instead of aborting the instance; every
/// rule classifies `Unavailable` input explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Collected<T> {
    Collected(T),
    Unavailable,
}

impl<T> Collected<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Collected::Collected(value) => Some(value),
            Collected::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Collected::Unavailable)
    }
}

impl<T> From<Option<T>> for Collected<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Collected::Collected(value),
            None => Collected::Unavailable,
        }
    }
}

/// Server-level facts from the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Dotted product version, e.g. "15.0.4322.2".
    pub product_version: String,
    pub edition: String,
    pub physical_memory_mb: u64,
    /// Online schedulers.
    pub scheduler_count: u32,
    /// Distinct NUMA nodes among the online schedulers.
    pub numa_node_count: u32,
}

impl ServerInfo {
    /// Major ordinal of the dotted product version; 0 when unparsable.
    pub fn major_version(&self) -> u32 {
        self.product_version
            .split('.')
            .next()
            .and_then(|major| major.parse().ok())
            .unwrap_or(0)
    }
}

/// Instance-wide sp_configure values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigValues {
    pub min_server_memory_mb: u64,
    pub max_server_memory_mb: u64,
    pub max_dop: u32,
    pub optimize_adhoc: bool,
    pub remote_admin_connections: bool,
    /// `None` on editions that do not expose the knob.
    pub backup_compression: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseOptions {
    pub name: String,
    pub auto_create_stats: bool,
    pub auto_update_stats: bool,
    pub page_verify: String,
    pub compatibility_level: u32,
    pub vlf_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileGrowth {
    pub database: String,
    pub logical_name: String,
    /// -1 means unlimited growth.
    pub max_size_mb: i64,
    pub is_percent_growth: bool,
    /// Growth increment in MB; meaningless when `is_percent_growth`.
    pub growth_mb: u64,
}

impl FileGrowth {
    pub fn is_unlimited(&self) -> bool {
        self.max_size_mb < 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDbStatus {
    pub database: String,
    /// Last known good DBCC CHECKDB; the 1900-01-01 sentinel when none is
    /// recorded.
    pub last_known_good: DateTime<Utc>,
}

impl CheckDbStatus {
    /// Timestamp reported for databases that have never been checked.
    pub fn never_checked() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryModel {
    Simple,
    Full,
    BulkLogged,
}

impl RecoveryModel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SIMPLE" => Some(Self::Simple),
            "FULL" => Some(Self::Full),
            "BULK_LOGGED" | "BULK-LOGGED" => Some(Self::BulkLogged),
            _ => None,
        }
    }

    /// Log backups only apply outside SIMPLE.
    pub fn takes_log_backups(self) -> bool {
        !matches!(self, Self::Simple)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupStatus {
    pub database: String,
    pub recovery_model: RecoveryModel,
    pub last_full: Option<DateTime<Utc>>,
    pub last_log: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempFile {
    pub logical_name: String,
    pub is_data_file: bool,
    pub size_mb: u64,
}

/// Everything collected from one instance. Owned exclusively by the worker
/// that fetched it; immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub server: Collected<ServerInfo>,
    pub config: Collected<ConfigValues>,
    pub databases: Collected<Vec<DatabaseOptions>>,
    pub files: Collected<Vec<FileGrowth>>,
    pub trace_flags: Collected<Vec<u32>>,
    pub checkdb: Collected<Vec<CheckDbStatus>>,
    pub backups: Collected<Vec<BackupStatus>>,
    pub tempdb: Collected<Vec<TempFile>>,
}

impl InstanceSnapshot {
    /// Snapshot with every category missing; the degenerate but still
    /// classifiable case.
    pub fn unavailable() -> Self {
        Self {
            server: Collected::Unavailable,
            config: Collected::Unavailable,
            databases: Collected::Unavailable,
            files: Collected::Unavailable,
            trace_flags: Collected::Unavailable,
            checkdb: Collected::Unavailable,
            backups: Collected::Unavailable,
            tempdb: Collected::Unavailable,
        }
    }
}
