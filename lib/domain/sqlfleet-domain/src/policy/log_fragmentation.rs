use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;

/// VLF counts above this degrade log throughput and recovery time.
const VLF_LIMIT: u64 = 1000;

/// Transaction-log fragmentation, measured in virtual log files.
pub fn check_log_fragmentation(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(databases) = snapshot.databases.as_ref() else {
        return RuleVerdict::review("database options not collected");
    };
    if databases.is_empty() {
        return RuleVerdict::review("no database metadata collected");
    }

    let mut offenders: Vec<(&str, u64)> = databases
        .iter()
        .filter(|db| db.vlf_count > VLF_LIMIT)
        .map(|db| (db.name.as_str(), db.vlf_count))
        .collect();

    if offenders.is_empty() {
        return RuleVerdict::ok(format!("no database above {VLF_LIMIT} VLFs"));
    }

    offenders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let listed: Vec<String> = offenders
        .iter()
        .map(|(name, count)| format!("{name} ({count} VLFs)"))
        .collect();
    RuleVerdict::review(listed.join(", "))
}
