use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::instance::InstanceIdentity;

/// The rule catalogue. Order here is the canonical report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Memory,
    InstanceConfig,
    MaxDop,
    DatabaseOptions,
    CompatLevel,
    LogFragmentation,
    Autogrowth,
    CheckDb,
    FullBackup,
    LogBackup,
    TraceFlags,
    TempDb,
}

pub const RULE_ORDER: [Rule; 12] = [
    Rule::Memory,
    Rule::InstanceConfig,
    Rule::MaxDop,
    Rule::DatabaseOptions,
    Rule::CompatLevel,
    Rule::LogFragmentation,
    Rule::Autogrowth,
    Rule::CheckDb,
    Rule::FullBackup,
    Rule::LogBackup,
    Rule::TraceFlags,
    Rule::TempDb,
];

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Memory => "Memory",
            Rule::InstanceConfig => "InstanceConfig",
            Rule::MaxDop => "MaxDop",
            Rule::DatabaseOptions => "DatabaseOptions",
            Rule::CompatLevel => "CompatLevel",
            Rule::LogFragmentation => "LogFragmentation",
            Rule::Autogrowth => "Autogrowth",
            Rule::CheckDb => "CheckDb",
            Rule::FullBackup => "FullBackup",
            Rule::LogBackup => "LogBackup",
            Rule::TraceFlags => "TraceFlags",
            Rule::TempDb => "TempDb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    Ok,
    Review,
    /// The rule does not apply to this instance (e.g. log backups when every
    /// database is SIMPLE). Excluded from tallies.
    NotApplicable,
}

impl RuleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleStatus::Ok => "OK",
            RuleStatus::Review => "REVIEW",
            RuleStatus::NotApplicable => "N/A",
        }
    }
}

/// Outcome of one rule against one instance. Produced only by the policy
/// engine; immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleVerdict {
    pub status: RuleStatus,
    pub detail: String,
}

impl RuleVerdict {
    pub fn ok(detail: impl Into<String>) -> Self {
        Self {
            status: RuleStatus::Ok,
            detail: detail.into(),
        }
    }

    pub fn review(detail: impl Into<String>) -> Self {
        Self {
            status: RuleStatus::Review,
            detail: detail.into(),
        }
    }

    pub fn not_applicable(detail: impl Into<String>) -> Self {
        Self {
            status: RuleStatus::NotApplicable,
            detail: detail.into(),
        }
    }
}

/// One assessed instance: identity, descriptive facts, and the verdicts in
/// canonical rule order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceReport {
    pub identity: InstanceIdentity,
    pub version_label: String,
    pub build_number: String,
    pub edition: String,
    pub physical_memory_mb: u64,
    pub cpu_count: u32,
    pub verdicts: Vec<(Rule, RuleVerdict)>,
}

impl InstanceReport {
    pub fn verdict(&self, rule: Rule) -> Option<&RuleVerdict> {
        self.verdicts
            .iter()
            .find(|(candidate, _)| *candidate == rule)
            .map(|(_, verdict)| verdict)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTally {
    pub ok: usize,
    pub review: usize,
}

/// Final, deduplicated output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRun {
    pub reports: Vec<InstanceReport>,
    pub tally: Vec<(Rule, RuleTally)>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AssessmentRun {
    pub fn tally_for(&self, rule: Rule) -> RuleTally {
        self.tally
            .iter()
            .find(|(candidate, _)| *candidate == rule)
            .map(|(_, tally)| *tally)
            .unwrap_or_default()
    }
}
