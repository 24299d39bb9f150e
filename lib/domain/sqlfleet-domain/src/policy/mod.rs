//! Best-practice rule catalogue. Every rule is a pure function from a
//! snapshot to a verdict: no I/O, no clock reads (recency rules take `now`
//! as an argument), and no failure path. Missing or unavailable input maps
//! to a defined REVIEW verdict, never to an error.

mod autogrowth;
mod backups;
mod compat_level;
mod database_options;
mod instance_config;
mod integrity;
mod log_fragmentation;
mod maxdop;
mod memory;
mod tempdb;
mod trace_flags;

pub use autogrowth::check_autogrowth;
pub use backups::{check_full_backups, check_log_backups};
pub use compat_level::check_compat_level;
pub use database_options::check_database_options;
pub use instance_config::check_instance_config;
pub use integrity::check_integrity;
pub use log_fragmentation::check_log_fragmentation;
pub use maxdop::{check_max_dop, recommended_max_dop};
pub use memory::check_memory;
pub use tempdb::check_tempdb;
pub use trace_flags::check_trace_flags;

use chrono::{DateTime, Utc};

use crate::report::{Rule, RuleVerdict};
use crate::snapshot::InstanceSnapshot;

/// Evaluate the whole catalogue against one snapshot, in canonical order.
pub fn evaluate_snapshot(
    snapshot: &InstanceSnapshot,
    now: DateTime<Utc>,
) -> Vec<(Rule, RuleVerdict)> {
    vec![
        (Rule::Memory, check_memory(snapshot)),
        (Rule::InstanceConfig, check_instance_config(snapshot)),
        (Rule::MaxDop, check_max_dop(snapshot)),
        (Rule::DatabaseOptions, check_database_options(snapshot)),
        (Rule::CompatLevel, check_compat_level(snapshot)),
        (Rule::LogFragmentation, check_log_fragmentation(snapshot)),
        (Rule::Autogrowth, check_autogrowth(snapshot)),
        (Rule::CheckDb, check_integrity(snapshot, now)),
        (Rule::FullBackup, check_full_backups(snapshot, now)),
        (Rule::LogBackup, check_log_backups(snapshot, now)),
        (Rule::TraceFlags, check_trace_flags(snapshot)),
        (Rule::TempDb, check_tempdb(snapshot)),
    ]
}
