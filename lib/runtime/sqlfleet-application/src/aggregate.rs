use chrono::{DateTime, Utc};

use sqlfleet_domain::{AssessmentRun, InstanceReport, RuleStatus, RuleTally, RULE_ORDER};

/// Deduplicate reports by instance identity and tally verdicts per rule.
///
/// Reports are sorted by (server, instance) before the first-wins dedup so
/// the result does not depend on worker completion order. NotApplicable
/// verdicts count toward neither OK nor REVIEW.
pub fn aggregate_reports(
    mut reports: Vec<InstanceReport>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
) -> AssessmentRun {
    reports.sort_by(|a, b| a.identity.cmp(&b.identity));
    reports.dedup_by(|later, earlier| later.identity == earlier.identity);

    let tally = RULE_ORDER
        .iter()
        .map(|rule| {
            let mut counts = RuleTally::default();
            for report in &reports {
                match report.verdict(*rule).map(|verdict| verdict.status) {
                    Some(RuleStatus::Ok) => counts.ok += 1,
                    Some(RuleStatus::Review) => counts.review += 1,
                    Some(RuleStatus::NotApplicable) | None => {}
                }
            }
            (*rule, counts)
        })
        .collect();

    AssessmentRun {
        reports,
        tally,
        started_at,
        finished_at,
    }
}
