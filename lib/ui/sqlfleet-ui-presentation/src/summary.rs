use sqlfleet_domain::{AssessmentRun, RULE_ORDER};

/// Console summary: instance count, then one OK/REVIEW line per rule.
pub fn summary_lines(run: &AssessmentRun) -> Vec<String> {
    let widest = RULE_ORDER
        .iter()
        .map(|rule| rule.name().len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("Instances assessed: {}", run.reports.len())];
    for rule in RULE_ORDER {
        let tally = run.tally_for(rule);
        lines.push(format!(
            "{:width$}  OK {:>3}   REVIEW {:>3}",
            rule.name(),
            tally.ok,
            tally.review,
            width = widest
        ));
    }
    lines
}
