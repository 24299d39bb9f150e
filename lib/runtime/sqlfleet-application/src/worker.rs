use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, warn};

use sqlfleet_domain::{
    evaluate_snapshot, Collected, EngineVersion, InstanceIdentity, InstanceReport,
    InstanceSnapshot, Target,
};
use sqlfleet_ports::{CollectResult, InstanceResolver, MetricsProvider};

/// Drives one target end to end: resolve its instances, collect every metric
/// category per instance, classify, and assemble reports. One worker is one
/// failure domain; nothing here can abort a sibling target.
pub struct TargetWorker {
    provider: Arc<dyn MetricsProvider>,
    resolver: Arc<dyn InstanceResolver>,
    timeout: Duration,
}

impl TargetWorker {
    pub fn new(
        provider: Arc<dyn MetricsProvider>,
        resolver: Arc<dyn InstanceResolver>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            resolver,
            timeout,
        }
    }

    /// Zero or more reports, one per reachable instance on the target.
    pub async fn assess_target(&self, target: &Target) -> Result<Vec<InstanceReport>> {
        let instances = self.resolver.resolve(target).await?;
        debug!(host = %target.host, instances = instances.len(), "resolved target");

        let mut reports = Vec::new();
        for identity in instances {
            match self.assess_instance(&identity).await {
                Ok(report) => reports.push(report),
                Err(error) => {
                    // Unreachable instance: skip it, keep the rest of the host.
                    warn!(instance = %identity, %error, "skipping instance");
                }
            }
        }
        Ok(reports)
    }

    async fn assess_instance(&self, identity: &InstanceIdentity) -> CollectResult<InstanceReport> {
        let timeout = self.timeout;
        let snapshot = InstanceSnapshot {
            server: degrade(
                self.provider.server_info(identity, timeout).await,
                identity,
                "server info",
            )?,
            config: degrade(
                self.provider.config_values(identity, timeout).await,
                identity,
                "config values",
            )?,
            databases: degrade(
                self.provider.database_options(identity, timeout).await,
                identity,
                "database options",
            )?,
            files: degrade(
                self.provider.file_growth(identity, timeout).await,
                identity,
                "file growth",
            )?,
            trace_flags: degrade(
                self.provider.trace_flags(identity, timeout).await,
                identity,
                "trace flags",
            )?,
            checkdb: degrade(
                self.provider.checkdb_history(identity, timeout).await,
                identity,
                "checkdb history",
            )?,
            backups: degrade(
                self.provider.backup_history(identity, timeout).await,
                identity,
                "backup history",
            )?,
            tempdb: degrade(
                self.provider.tempdb_files(identity, timeout).await,
                identity,
                "tempdb files",
            )?,
        };

        Ok(build_report(identity.clone(), &snapshot))
    }
}

/// Category failure handling: unavailable degrades to `Unavailable`,
/// unreachable propagates and skips the instance.
fn degrade<T>(
    result: CollectResult<T>,
    identity: &InstanceIdentity,
    category: &str,
) -> CollectResult<Collected<T>> {
    match result {
        Ok(value) => Ok(Collected::Collected(value)),
        Err(error) if error.is_unreachable() => Err(error),
        Err(error) => {
            warn!(instance = %identity, category, %error, "category degraded to empty");
            Ok(Collected::Unavailable)
        }
    }
}

/// Classify a snapshot and attach the descriptive fields.
pub fn build_report(identity: InstanceIdentity, snapshot: &InstanceSnapshot) -> InstanceReport {
    let verdicts = evaluate_snapshot(snapshot, Utc::now());
    match snapshot.server.as_ref() {
        Some(server) => InstanceReport {
            identity,
            version_label: EngineVersion::from_major(server.major_version())
                .label()
                .to_string(),
            build_number: server.product_version.clone(),
            edition: server.edition.clone(),
            physical_memory_mb: server.physical_memory_mb,
            cpu_count: server.scheduler_count,
            verdicts,
        },
        None => InstanceReport {
            identity,
            version_label: "Unknown".to_string(),
            build_number: String::new(),
            edition: String::new(),
            physical_memory_mb: 0,
            cpu_count: 0,
            verdicts,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubBehavior, StubProvider, StubResolver};
    use sqlfleet_domain::{Rule, RuleStatus};

    #[tokio::test]
    async fn test_unreachable_instance_is_skipped() {
        let provider = Arc::new(StubProvider::new(StubBehavior::Unreachable));
        let resolver = Arc::new(StubResolver::per_host(vec!["DEFAULT".to_string()]));
        let worker = TargetWorker::new(provider, resolver, Duration::from_secs(1));

        let reports = worker.assess_target(&Target::new("sql01")).await.unwrap();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_degraded_category_still_reports() {
        let provider = Arc::new(StubProvider::new(StubBehavior::BackupsUnavailable));
        let resolver = Arc::new(StubResolver::per_host(vec!["DEFAULT".to_string()]));
        let worker = TargetWorker::new(provider, resolver, Duration::from_secs(1));

        let reports = worker.assess_target(&Target::new("sql01")).await.unwrap();
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        // Backup rules resolve to REVIEW instead of crashing the instance.
        assert_eq!(
            report.verdict(Rule::FullBackup).unwrap().status,
            RuleStatus::Review
        );
        // A healthy category still classifies normally.
        assert_eq!(
            report.verdict(Rule::Memory).unwrap().status,
            RuleStatus::Ok
        );
    }

    #[tokio::test]
    async fn test_multi_instance_host_yields_one_report_each() {
        let provider = Arc::new(StubProvider::new(StubBehavior::Healthy));
        let resolver = Arc::new(StubResolver::per_host(vec![
            "DEFAULT".to_string(),
            "PAYROLL".to_string(),
        ]));
        let worker = TargetWorker::new(provider, resolver, Duration::from_secs(1));

        let reports = worker.assess_target(&Target::new("sql01")).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].identity.server, "sql01");
        assert_eq!(reports[1].identity.instance, "PAYROLL");
    }

    #[test]
    fn test_report_without_server_info_is_unknown() {
        let snapshot = InstanceSnapshot::unavailable();
        let report = build_report(InstanceIdentity::default_instance("sql01"), &snapshot);
        assert_eq!(report.version_label, "Unknown");
        assert_eq!(report.cpu_count, 0);
        assert_eq!(report.verdicts.len(), 12);
    }
}
