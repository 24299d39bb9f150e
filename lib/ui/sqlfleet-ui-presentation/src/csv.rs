use sqlfleet_domain::{AssessmentRun, InstanceReport, RULE_ORDER};

/// Fixed column order: identity, one status column per rule, descriptive
/// fields, then one detail column per rule.
pub fn header_row() -> Vec<String> {
    let mut columns = vec!["ServerName".to_string(), "InstanceName".to_string()];
    for rule in RULE_ORDER {
        columns.push(format!("{}Status", rule.name()));
    }
    columns.extend(
        ["Version", "Build", "Edition", "PhysicalMemoryMB", "CpuCount"]
            .map(str::to_string),
    );
    for rule in RULE_ORDER {
        columns.push(format!("{}Detail", rule.name()));
    }
    columns
}

pub fn report_row(report: &InstanceReport) -> Vec<String> {
    let mut row = vec![
        report.identity.server.clone(),
        report.identity.instance.clone(),
    ];
    for rule in RULE_ORDER {
        row.push(
            report
                .verdict(rule)
                .map(|verdict| verdict.status.as_str().to_string())
                .unwrap_or_default(),
        );
    }
    row.push(report.version_label.clone());
    row.push(report.build_number.clone());
    row.push(report.edition.clone());
    row.push(report.physical_memory_mb.to_string());
    row.push(report.cpu_count.to_string());
    for rule in RULE_ORDER {
        row.push(
            report
                .verdict(rule)
                .map(|verdict| verdict.detail.clone())
                .unwrap_or_default(),
        );
    }
    row
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn render_csv(run: &AssessmentRun) -> String {
    let mut lines = Vec::with_capacity(run.reports.len() + 1);
    lines.push(join(&header_row()));
    for report in &run.reports {
        lines.push(join(&report_row(report)));
    }
    lines.join("\n") + "\n"
}

fn join(row: &[String]) -> String {
    row.iter()
        .map(|field| escape(field))
        .collect::<Vec<_>>()
        .join(",")
}
