use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use sqlfleet_domain::{AssessmentRun, InstanceReport, Target};

use crate::aggregate::aggregate_reports;
use crate::worker::TargetWorker;

/// Fans targets out to workers through a bounded pool and joins every
/// outcome before aggregation. A failed target contributes nothing and
/// never blocks or aborts the others; there are no retries.
pub struct Orchestrator {
    worker: Arc<TargetWorker>,
    max_concurrent: usize,
}

impl Orchestrator {
    pub fn new(worker: TargetWorker, max_concurrent: usize) -> Self {
        Self {
            worker: Arc::new(worker),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Assess the whole fleet. Errors only when no target produced any
    /// report at all.
    pub async fn run_fleet(&self, targets: Vec<Target>) -> Result<AssessmentRun> {
        let started_at = Utc::now();
        let target_count = targets.len();
        let reports = self.collect_reports(targets).await;
        info!(
            targets = target_count,
            reports = reports.len(),
            "fleet collection finished"
        );

        if reports.is_empty() {
            bail!("no instance produced a report across {target_count} targets");
        }
        Ok(aggregate_reports(reports, started_at, Utc::now()))
    }

    async fn collect_reports(&self, targets: Vec<Target>) -> Vec<InstanceReport> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for target in targets {
            let worker = Arc::clone(&self.worker);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // Closing the semaphore is not part of this design; acquire
                // can only fail then, so treat it as an empty contribution.
                let Ok(_permit) = semaphore.acquire().await else {
                    return Vec::new();
                };
                match worker.assess_target(&target).await {
                    Ok(reports) => reports,
                    Err(error) => {
                        warn!(host = %target.host, %error, "target failed");
                        Vec::new()
                    }
                }
            });
        }

        let mut reports = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(batch) => reports.extend(batch),
                Err(error) => warn!(%error, "worker task panicked"),
            }
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingResolver, StubBehavior, StubProvider, StubResolver};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn worker(
        provider: Arc<StubProvider>,
        resolver: Arc<dyn sqlfleet_ports::InstanceResolver>,
    ) -> TargetWorker {
        TargetWorker::new(provider, resolver, Duration::from_secs(1))
    }

    fn targets(hosts: &[&str]) -> Vec<Target> {
        hosts.iter().map(|host| Target::new(*host)).collect()
    }

    #[tokio::test]
    async fn test_all_targets_reported() {
        let provider = Arc::new(StubProvider::new(StubBehavior::Healthy));
        let resolver = Arc::new(StubResolver::per_host(vec!["DEFAULT".to_string()]));
        let orchestrator = Orchestrator::new(worker(Arc::clone(&provider), resolver), 4);

        let run = orchestrator
            .run_fleet(targets(&["sql01", "sql02", "sql03"]))
            .await
            .unwrap();
        assert_eq!(run.reports.len(), 3);
        // Eight categories per instance, three instances.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 24);
    }

    #[tokio::test]
    async fn test_failed_target_does_not_block_others() {
        let provider = Arc::new(StubProvider::new(StubBehavior::Healthy));
        let resolver = Arc::new(FailingResolver {
            failing_host: "sql02".to_string(),
        });
        let orchestrator = Orchestrator::new(worker(provider, resolver), 4);

        let run = orchestrator
            .run_fleet(targets(&["sql01", "sql02", "sql03"]))
            .await
            .unwrap();
        let servers: Vec<_> = run
            .reports
            .iter()
            .map(|report| report.identity.server.as_str())
            .collect();
        assert_eq!(servers, vec!["sql01", "sql03"]);
    }

    #[tokio::test]
    async fn test_zero_reports_is_a_run_error() {
        let provider = Arc::new(StubProvider::new(StubBehavior::Unreachable));
        let resolver = Arc::new(StubResolver::per_host(vec!["DEFAULT".to_string()]));
        let orchestrator = Orchestrator::new(worker(provider, resolver), 4);

        let result = orchestrator.run_fleet(targets(&["sql01", "sql02"])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_targets_deduplicate() {
        let provider = Arc::new(StubProvider::new(StubBehavior::Healthy));
        let resolver = Arc::new(StubResolver::per_host(vec!["DEFAULT".to_string()]));
        let orchestrator = Orchestrator::new(worker(provider, resolver), 4);

        let run = orchestrator
            .run_fleet(targets(&["sql01", "sql01", "sql01"]))
            .await
            .unwrap();
        assert_eq!(run.reports.len(), 1);
    }

    #[tokio::test]
    async fn test_pool_bounds_in_flight_targets() {
        let provider = Arc::new(StubProvider::new(StubBehavior::Healthy));
        let resolver = Arc::new(
            StubResolver::per_host(vec!["DEFAULT".to_string()])
                .with_delay(Duration::from_millis(20)),
        );
        let max_in_flight = Arc::clone(&resolver.max_in_flight);
        let orchestrator = Orchestrator::new(worker(provider, resolver), 2);

        orchestrator
            .run_fleet(targets(&["a", "b", "c", "d", "e", "f"]))
            .await
            .unwrap();
        assert!(max_in_flight.load(Ordering::SeqCst) <= 2);
    }
}
