use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;
use crate::version::EngineVersion;

/// NUMA/CPU-aware MaxDOP recommendation. Returns 0 for combinations the
/// table does not cover, which can never match a legitimate setting.
pub fn recommended_max_dop(cpu: u32, numa: u32, version: EngineVersion) -> u32 {
    if cpu == 0 || numa == 0 {
        return 0;
    }
    if numa == 1 {
        return cpu.min(8);
    }

    let per_node = cpu.div_ceil(numa);
    if version.major() >= 13 {
        if per_node <= 15 {
            per_node
        } else {
            per_node.div_ceil(2).min(16)
        }
    } else if per_node < 8 {
        per_node
    } else {
        8
    }
}

/// Configured MaxDOP must equal the recommendation; 0 never does.
pub fn check_max_dop(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(config) = snapshot.config.as_ref() else {
        return RuleVerdict::review("configuration values not collected");
    };
    let Some(server) = snapshot.server.as_ref() else {
        return RuleVerdict::review("server information not collected");
    };

    let version = EngineVersion::from_major(server.major_version());
    let recommended = recommended_max_dop(server.scheduler_count, server.numa_node_count, version);

    if recommended == 0 {
        return RuleVerdict::review(format!(
            "no recommendation for {} schedulers over {} NUMA nodes",
            server.scheduler_count, server.numa_node_count
        ));
    }

    if config.max_dop == recommended {
        RuleVerdict::ok(format!(
            "MaxDOP {} matches recommendation ({} schedulers, {} NUMA nodes)",
            config.max_dop, server.scheduler_count, server.numa_node_count
        ))
    } else {
        RuleVerdict::review(format!(
            "MaxDOP is {}, recommended {} ({} schedulers, {} NUMA nodes)",
            config.max_dop, recommended, server.scheduler_count, server.numa_node_count
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RuleStatus;
    use crate::snapshot::{Collected, ConfigValues, ServerInfo};

    #[test]
    fn test_single_numa_node_caps_at_eight() {
        let v = EngineVersion::Sql2019;
        assert_eq!(recommended_max_dop(6, 1, v), 6);
        assert_eq!(recommended_max_dop(20, 1, v), 8);
    }

    #[test]
    fn test_modern_versions_use_per_node_count() {
        // major 14, 4 nodes, 40 cpus: 10 per node, within the 15 cap.
        assert_eq!(recommended_max_dop(40, 4, EngineVersion::Sql2017), 10);
        // 64 cpus over 2 nodes: 32 per node, halved and capped at 16.
        assert_eq!(recommended_max_dop(64, 2, EngineVersion::Sql2017), 16);
        assert_eq!(recommended_max_dop(36, 2, EngineVersion::Sql2016), 9);
    }

    #[test]
    fn test_pre_2016_caps_per_node_at_eight() {
        // major 12, 2 nodes, 20 cpus: 10 per node, capped at 8.
        assert_eq!(recommended_max_dop(20, 2, EngineVersion::Sql2014), 8);
        assert_eq!(recommended_max_dop(12, 2, EngineVersion::Sql2012), 6);
    }

    #[test]
    fn test_uncovered_combination_recommends_zero() {
        assert_eq!(recommended_max_dop(0, 1, EngineVersion::Sql2019), 0);
        assert_eq!(recommended_max_dop(8, 0, EngineVersion::Sql2019), 0);
    }

    fn snapshot(max_dop: u32, cpu: u32, numa: u32) -> InstanceSnapshot {
        let mut snapshot = InstanceSnapshot::unavailable();
        snapshot.server = Collected::Collected(ServerInfo {
            product_version: "15.0.4322.2".to_string(),
            edition: "Enterprise Edition".to_string(),
            physical_memory_mb: 65536,
            scheduler_count: cpu,
            numa_node_count: numa,
        });
        snapshot.config = Collected::Collected(ConfigValues {
            min_server_memory_mb: 1024,
            max_server_memory_mb: 49152,
            max_dop,
            optimize_adhoc: true,
            remote_admin_connections: true,
            backup_compression: Some(true),
        });
        snapshot
    }

    #[test]
    fn test_matching_setting_is_ok() {
        let verdict = check_max_dop(&snapshot(8, 16, 1));
        assert_eq!(verdict.status, RuleStatus::Ok);
    }

    #[test]
    fn test_zero_setting_is_review() {
        let verdict = check_max_dop(&snapshot(0, 16, 1));
        assert_eq!(verdict.status, RuleStatus::Review);
        assert!(verdict.detail.contains("recommended 8"));
    }

    #[test]
    fn test_mismatch_is_review() {
        let verdict = check_max_dop(&snapshot(4, 16, 1));
        assert_eq!(verdict.status, RuleStatus::Review);
    }
}
