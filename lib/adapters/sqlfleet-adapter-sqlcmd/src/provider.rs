use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use sqlfleet_domain::{
    BackupStatus, CheckDbStatus, ConfigValues, DatabaseOptions, FileGrowth, InstanceIdentity,
    ServerInfo, TempFile,
};
use sqlfleet_ports::{CollectError, CollectResult, MetricsProvider};

use crate::parse;
use crate::queries;

/// stderr markers that mean the instance itself is not reachable, as
/// opposed to one query being denied or failing.
const UNREACHABLE_MARKERS: [&str; 3] = [
    "Could not open a connection",
    "Login timeout expired",
    "TCP Provider: No connection could be made",
];

/// Metrics provider that shells out to `sqlcmd` per category query and
/// parses its pipe-delimited output.
#[derive(Debug, Clone)]
pub struct SqlcmdProvider {
    binary: String,
}

impl SqlcmdProvider {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run_query(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
        query: &str,
    ) -> CollectResult<String> {
        let connection = identity.connection_name();
        debug!(instance = %identity, "running category query");

        let child = Command::new(&self.binary)
            .arg("-S")
            .arg(&connection)
            .arg("-E")
            .arg("-Q")
            .arg(query)
            .args(["-h", "-1", "-s", "|", "-W", "-b"])
            .kill_on_drop(true)
            .output();

        let output: Output = tokio::time::timeout(timeout, child)
            .await
            .map_err(|_| {
                CollectError::Unreachable(format!("{connection}: query timed out"))
            })?
            .map_err(|error| {
                CollectError::Unavailable(format!("spawning {}: {error}", self.binary))
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if UNREACHABLE_MARKERS
            .iter()
            .any(|marker| stderr.contains(marker))
        {
            Err(CollectError::Unreachable(format!(
                "{connection}: {}",
                stderr.trim()
            )))
        } else {
            Err(CollectError::Unavailable(format!(
                "{connection}: {}",
                stderr.trim()
            )))
        }
    }
}

#[async_trait]
impl MetricsProvider for SqlcmdProvider {
    async fn server_info(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<ServerInfo> {
        let raw = self.run_query(identity, timeout, queries::SERVER_INFO).await;
        // Server info doubles as the liveness probe: any failure here means
        // the instance cannot be assessed at all.
        let raw = raw.map_err(|error| {
            CollectError::Unreachable(error.to_string())
        })?;
        parse::parse_server_info(&raw)
            .ok_or_else(|| CollectError::Unavailable("unparsable server info".into()))
    }

    async fn config_values(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<ConfigValues> {
        let raw = self
            .run_query(identity, timeout, queries::CONFIG_VALUES)
            .await?;
        parse::parse_config_values(&raw)
            .ok_or_else(|| CollectError::Unavailable("unparsable configuration values".into()))
    }

    async fn database_options(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<DatabaseOptions>> {
        let raw = self
            .run_query(identity, timeout, queries::DATABASE_OPTIONS)
            .await?;
        Ok(parse::parse_database_options(&raw))
    }

    async fn file_growth(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<FileGrowth>> {
        let raw = self.run_query(identity, timeout, queries::FILE_GROWTH).await?;
        Ok(parse::parse_file_growth(&raw))
    }

    async fn trace_flags(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<u32>> {
        let raw = self.run_query(identity, timeout, queries::TRACE_FLAGS).await?;
        Ok(parse::parse_trace_flags(&raw))
    }

    async fn checkdb_history(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<CheckDbStatus>> {
        let raw = self
            .run_query(identity, timeout, queries::CHECKDB_HISTORY)
            .await?;
        Ok(parse::parse_checkdb_history(&raw))
    }

    async fn backup_history(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<BackupStatus>> {
        let raw = self
            .run_query(identity, timeout, queries::BACKUP_HISTORY)
            .await?;
        Ok(parse::parse_backup_history(&raw))
    }

    async fn tempdb_files(
        &self,
        identity: &InstanceIdentity,
        timeout: Duration,
    ) -> CollectResult<Vec<TempFile>> {
        let raw = self
            .run_query(identity, timeout, queries::TEMPDB_FILES)
            .await?;
        Ok(parse::parse_tempdb_files(&raw))
    }
}
