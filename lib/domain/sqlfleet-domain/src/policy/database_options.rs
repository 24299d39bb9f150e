use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;

/// Per-database statistics and page-verify options. Every database must have
/// auto-create-stats, auto-update-stats, and CHECKSUM page verification.
pub fn check_database_options(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(databases) = snapshot.databases.as_ref() else {
        return RuleVerdict::review("database options not collected");
    };
    if databases.is_empty() {
        return RuleVerdict::review("no database metadata collected");
    }

    let mut offenders = Vec::new();
    for db in databases {
        let mut reasons = Vec::new();
        if !db.auto_create_stats {
            reasons.push("auto-create-stats off");
        }
        if !db.auto_update_stats {
            reasons.push("auto-update-stats off");
        }
        if !db.page_verify.eq_ignore_ascii_case("CHECKSUM") {
            reasons.push("page verify not CHECKSUM");
        }
        if !reasons.is_empty() {
            offenders.push(format!("{} ({})", db.name, reasons.join(", ")));
        }
    }

    if offenders.is_empty() {
        RuleVerdict::ok(format!("{} databases compliant", databases.len()))
    } else {
        RuleVerdict::review(offenders.join("; "))
    }
}
