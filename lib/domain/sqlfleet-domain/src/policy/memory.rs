use crate::report::RuleVerdict;
use crate::snapshot::{InstanceSnapshot, MAX_MEMORY_UNLIMITED_MB};

/// Expected `min server memory` setting in MB.
const EXPECTED_MIN_MB: u64 = 1024;

/// Memory configuration: min pinned to 1024 MB, max between 75% of physical
/// and strictly below physical.
pub fn check_memory(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(config) = snapshot.config.as_ref() else {
        return RuleVerdict::review("configuration values not collected");
    };
    let Some(server) = snapshot.server.as_ref() else {
        return RuleVerdict::review("server information not collected");
    };

    let total = server.physical_memory_mb;
    let floor = (total * 3).div_ceil(4);
    let mut problems = Vec::new();

    if config.max_server_memory_mb == MAX_MEMORY_UNLIMITED_MB {
        problems.push("max server memory not configured (unlimited)".to_string());
    } else {
        if config.max_server_memory_mb >= total {
            problems.push(format!(
                "max server memory {} MB is not below physical {} MB",
                config.max_server_memory_mb, total
            ));
        }
        if config.max_server_memory_mb < floor {
            problems.push(format!(
                "max server memory {} MB is below 75% of physical ({} MB)",
                config.max_server_memory_mb, floor
            ));
        }
    }

    if config.min_server_memory_mb != EXPECTED_MIN_MB {
        problems.push(format!(
            "min server memory is {} MB, expected {} MB",
            config.min_server_memory_mb, EXPECTED_MIN_MB
        ));
    }

    if problems.is_empty() {
        RuleVerdict::ok(format!(
            "min {} MB, max {} MB of {} MB physical",
            config.min_server_memory_mb, config.max_server_memory_mb, total
        ))
    } else {
        RuleVerdict::review(problems.join("; "))
    }
}
