use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;

/// Instance-wide flags: ad-hoc workload optimization and remote admin
/// connections must be on; backup compression must be on wherever the
/// edition exposes it.
pub fn check_instance_config(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(config) = snapshot.config.as_ref() else {
        return RuleVerdict::review("configuration values not collected");
    };

    let mut problems = Vec::new();
    if !config.optimize_adhoc {
        problems.push("optimize for ad hoc workloads is disabled");
    }
    if !config.remote_admin_connections {
        problems.push("remote admin connections is disabled");
    }
    if config.backup_compression == Some(false) {
        problems.push("backup compression default is disabled");
    }

    if problems.is_empty() {
        let compression = match config.backup_compression {
            Some(_) => "backup compression on",
            None => "backup compression not offered by this edition",
        };
        RuleVerdict::ok(format!("ad hoc and remote admin on; {compression}"))
    } else {
        RuleVerdict::review(problems.join("; "))
    }
}
