use std::collections::BTreeSet;

use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;
use crate::version::EngineVersion;

/// The generation's required trace-flag set must be a subset of the flags
/// enabled on the instance.
pub fn check_trace_flags(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(server) = snapshot.server.as_ref() else {
        return RuleVerdict::review("server information not collected");
    };
    let Some(enabled) = snapshot.trace_flags.as_ref() else {
        return RuleVerdict::review("trace flag list not collected");
    };

    let version = EngineVersion::from_major(server.major_version());
    let Some(required) = version.required_trace_flags() else {
        return RuleVerdict::review(format!(
            "no trace flag policy defined for engine version {}",
            server.product_version
        ));
    };

    if enabled.is_empty() {
        let wanted: Vec<String> = required.iter().map(u32::to_string).collect();
        return RuleVerdict::review(format!(
            "no trace flags enabled; required: {}",
            wanted.join(", ")
        ));
    }

    let enabled: BTreeSet<u32> = enabled.iter().copied().collect();
    let missing: Vec<String> = required
        .difference(&enabled)
        .map(u32::to_string)
        .collect();

    if missing.is_empty() {
        let listed: Vec<String> = required.iter().map(u32::to_string).collect();
        RuleVerdict::ok(format!("required flags enabled: {}", listed.join(", ")))
    } else {
        RuleVerdict::review(format!("missing trace flags: {}", missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RuleStatus;
    use crate::snapshot::{Collected, ServerInfo};

    fn snapshot(major: u32, flags: &[u32]) -> InstanceSnapshot {
        let mut snapshot = InstanceSnapshot::unavailable();
        snapshot.server = Collected::Collected(ServerInfo {
            product_version: format!("{major}.0.5026.0"),
            edition: "Standard Edition".to_string(),
            physical_memory_mb: 32768,
            scheduler_count: 8,
            numa_node_count: 1,
        });
        snapshot.trace_flags = Collected::Collected(flags.to_vec());
        snapshot
    }

    #[test]
    fn test_missing_required_flag_is_review() {
        let verdict = check_trace_flags(&snapshot(13, &[4199]));
        assert_eq!(verdict.status, RuleStatus::Review);
        assert!(verdict.detail.contains("7745"));
    }

    #[test]
    fn test_complete_set_is_ok() {
        let verdict = check_trace_flags(&snapshot(13, &[4199, 7745]));
        assert_eq!(verdict.status, RuleStatus::Ok);
    }

    #[test]
    fn test_extra_flags_still_ok() {
        let verdict = check_trace_flags(&snapshot(13, &[3226, 4199, 7745]));
        assert_eq!(verdict.status, RuleStatus::Ok);
    }

    #[test]
    fn test_unknown_version_is_review_regardless() {
        let verdict = check_trace_flags(&snapshot(99, &[4199, 7745, 12310]));
        assert_eq!(verdict.status, RuleStatus::Review);
        assert!(verdict.detail.contains("no trace flag policy"));
    }

    #[test]
    fn test_empty_flag_list_is_review() {
        let verdict = check_trace_flags(&snapshot(15, &[]));
        assert_eq!(verdict.status, RuleStatus::Review);
        assert!(verdict.detail.contains("no trace flags enabled"));
    }
}
