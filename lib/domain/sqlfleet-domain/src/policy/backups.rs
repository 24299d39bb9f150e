use chrono::{DateTime, Duration, Utc};

use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;

/// Maximum age of the last full backup.
const FULL_BACKUP_MAX_AGE_DAYS: i64 = 7;
/// Maximum age of the last log backup for FULL/BULK_LOGGED databases.
const LOG_BACKUP_MAX_AGE_HOURS: i64 = 24;

/// Full-backup recency across every database.
pub fn check_full_backups(snapshot: &InstanceSnapshot, now: DateTime<Utc>) -> RuleVerdict {
    let Some(backups) = snapshot.backups.as_ref() else {
        return RuleVerdict::review("backup history not collected");
    };
    if backups.is_empty() {
        return RuleVerdict::review("no backup history collected");
    }

    let cutoff = now - Duration::days(FULL_BACKUP_MAX_AGE_DAYS);
    let offenders: Vec<String> = backups
        .iter()
        .filter_map(|entry| match entry.last_full {
            None => Some(format!("{} (no full backup)", entry.database)),
            Some(taken) if taken < cutoff => {
                Some(format!("{} ({})", entry.database, taken.format("%Y-%m-%d")))
            }
            Some(_) => None,
        })
        .collect();

    if offenders.is_empty() {
        RuleVerdict::ok(format!(
            "all full backups within {FULL_BACKUP_MAX_AGE_DAYS} days"
        ))
    } else {
        RuleVerdict::review(offenders.join(", "))
    }
}

/// Log-backup recency for databases whose recovery model takes log backups.
/// A fleet of purely SIMPLE databases makes the rule inapplicable rather
/// than OK or REVIEW.
pub fn check_log_backups(snapshot: &InstanceSnapshot, now: DateTime<Utc>) -> RuleVerdict {
    let Some(backups) = snapshot.backups.as_ref() else {
        return RuleVerdict::review("backup history not collected");
    };
    if backups.is_empty() {
        return RuleVerdict::review("no backup history collected");
    }

    let considered: Vec<_> = backups
        .iter()
        .filter(|entry| entry.recovery_model.takes_log_backups())
        .collect();
    if considered.is_empty() {
        return RuleVerdict::not_applicable("all databases use the SIMPLE recovery model");
    }

    let cutoff = now - Duration::hours(LOG_BACKUP_MAX_AGE_HOURS);
    let offenders: Vec<String> = considered
        .iter()
        .filter_map(|entry| match entry.last_log {
            None => Some(format!("{} (no log backup)", entry.database)),
            Some(taken) if taken < cutoff => Some(format!(
                "{} ({})",
                entry.database,
                taken.format("%Y-%m-%d %H:%M")
            )),
            Some(_) => None,
        })
        .collect();

    if offenders.is_empty() {
        RuleVerdict::ok(format!(
            "all log backups within {LOG_BACKUP_MAX_AGE_HOURS} hours"
        ))
    } else {
        RuleVerdict::review(offenders.join(", "))
    }
}
