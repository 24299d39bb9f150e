use crate::report::RuleVerdict;
use crate::snapshot::{FileGrowth, InstanceSnapshot};

/// Largest acceptable fixed growth increment.
const GROWTH_LIMIT_MB: u64 = 1024;

fn file_label(file: &FileGrowth) -> String {
    format!("{}.{}", file.database, file.logical_name)
}

/// File autogrowth settings: no unlimited growth, no percentage growth, no
/// increments above 1024 MB.
pub fn check_autogrowth(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(files) = snapshot.files.as_ref() else {
        return RuleVerdict::review("file growth metadata not collected");
    };
    if files.is_empty() {
        return RuleVerdict::review("no file growth metadata collected");
    }

    let unlimited: Vec<String> = files
        .iter()
        .filter(|file| file.is_unlimited())
        .map(file_label)
        .collect();
    let percent: Vec<String> = files
        .iter()
        .filter(|file| file.is_percent_growth)
        .map(file_label)
        .collect();
    let oversized: Vec<String> = files
        .iter()
        .filter(|file| !file.is_percent_growth && file.growth_mb > GROWTH_LIMIT_MB)
        .map(file_label)
        .collect();

    let mut categories = Vec::new();
    if !unlimited.is_empty() {
        categories.push(format!("unlimited growth: {}", unlimited.join(", ")));
    }
    if !percent.is_empty() {
        categories.push(format!("percent growth: {}", percent.join(", ")));
    }
    if !oversized.is_empty() {
        categories.push(format!(
            "increment above {} MB: {}",
            GROWTH_LIMIT_MB,
            oversized.join(", ")
        ));
    }

    if categories.is_empty() {
        RuleVerdict::ok(format!("{} files within growth policy", files.len()))
    } else {
        RuleVerdict::review(categories.join("; "))
    }
}
