use chrono::{DateTime, Duration, Utc};

use crate::report::RuleVerdict;
use crate::snapshot::{CheckDbStatus, InstanceSnapshot};

/// Maximum age of the last known good DBCC CHECKDB.
const MAX_AGE_DAYS: i64 = 7;

/// Corruption-check recency: every database needs a clean CHECKDB within the
/// last seven days. The 1900 sentinel means never checked.
pub fn check_integrity(snapshot: &InstanceSnapshot, now: DateTime<Utc>) -> RuleVerdict {
    let Some(history) = snapshot.checkdb.as_ref() else {
        return RuleVerdict::review("integrity check history not collected");
    };
    if history.is_empty() {
        return RuleVerdict::review("no integrity check history collected");
    }

    let cutoff = now - Duration::days(MAX_AGE_DAYS);
    let never = CheckDbStatus::never_checked();
    let offenders: Vec<String> = history
        .iter()
        .filter(|entry| entry.last_known_good < cutoff)
        .map(|entry| {
            if entry.last_known_good == never {
                format!("{} (never)", entry.database)
            } else {
                format!("{} ({})", entry.database, entry.last_known_good.format("%Y-%m-%d"))
            }
        })
        .collect();

    if offenders.is_empty() {
        RuleVerdict::ok(format!("all checked within {MAX_AGE_DAYS} days"))
    } else {
        RuleVerdict::review(offenders.join(", "))
    }
}
