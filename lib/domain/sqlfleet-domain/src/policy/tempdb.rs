use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;
use crate::version::EngineVersion;

/// Minimum tempdb data-file count for a CPU count.
fn minimum_data_files(cpu: u32) -> usize {
    match cpu {
        4 => 2,
        8 => 4,
        _ => 8,
    }
}

/// Tempdb layout: data-file count a multiple of 4, at least the
/// processor-based minimum, all data files equally sized. From 2022 onward a
/// single data file is also acceptable.
pub fn check_tempdb(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(server) = snapshot.server.as_ref() else {
        return RuleVerdict::review("server information not collected");
    };
    let Some(files) = snapshot.tempdb.as_ref() else {
        return RuleVerdict::review("tempdb file metadata not collected");
    };

    let data_files: Vec<_> = files.iter().filter(|file| file.is_data_file).collect();
    if data_files.is_empty() {
        return RuleVerdict::review("no tempdb data files collected");
    }

    let version = EngineVersion::from_major(server.major_version());
    if data_files.len() == 1 && version.allows_single_tempdb_file() {
        return RuleVerdict::ok(format!(
            "single data file accepted on {}",
            version.label()
        ));
    }

    let minimum = minimum_data_files(server.scheduler_count);
    let mut problems = Vec::new();
    if data_files.len() % 4 != 0 {
        problems.push(format!(
            "{} data files is not a multiple of 4",
            data_files.len()
        ));
    }
    if data_files.len() < minimum {
        problems.push(format!(
            "{} data files, minimum {} for {} CPUs",
            data_files.len(),
            minimum,
            server.scheduler_count
        ));
    }

    let first_size = data_files[0].size_mb;
    if data_files.iter().any(|file| file.size_mb != first_size) {
        let sizes: Vec<String> = data_files
            .iter()
            .map(|file| format!("{} ({} MB)", file.logical_name, file.size_mb))
            .collect();
        problems.push(format!("unequal data file sizes: {}", sizes.join(", ")));
    }

    if problems.is_empty() {
        RuleVerdict::ok(format!(
            "{} equally sized data files",
            data_files.len()
        ))
    } else {
        RuleVerdict::review(problems.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RuleStatus;
    use crate::snapshot::{Collected, ServerInfo, TempFile};

    fn snapshot(major: u32, cpu: u32, sizes: &[u64]) -> InstanceSnapshot {
        let mut snapshot = InstanceSnapshot::unavailable();
        snapshot.server = Collected::Collected(ServerInfo {
            product_version: format!("{major}.0.4322.2"),
            edition: "Standard Edition".to_string(),
            physical_memory_mb: 32768,
            scheduler_count: cpu,
            numa_node_count: 1,
        });
        let mut files: Vec<TempFile> = sizes
            .iter()
            .enumerate()
            .map(|(index, size_mb)| TempFile {
                logical_name: format!("tempdev{}", index + 1),
                is_data_file: true,
                size_mb: *size_mb,
            })
            .collect();
        files.push(TempFile {
            logical_name: "templog".to_string(),
            is_data_file: false,
            size_mb: 512,
        });
        snapshot.tempdb = Collected::Collected(files);
        snapshot
    }

    #[test]
    fn test_four_equal_files_on_eight_cpus_is_ok() {
        let verdict = check_tempdb(&snapshot(15, 8, &[1024, 1024, 1024, 1024]));
        assert_eq!(verdict.status, RuleStatus::Ok);
    }

    #[test]
    fn test_three_files_is_review() {
        let verdict = check_tempdb(&snapshot(15, 8, &[1024, 1024, 1024]));
        assert_eq!(verdict.status, RuleStatus::Review);
        assert!(verdict.detail.contains("not a multiple of 4"));
        assert!(verdict.detail.contains("minimum 4"));
    }

    #[test]
    fn test_unequal_sizes_is_review() {
        let verdict = check_tempdb(&snapshot(15, 8, &[1024, 1024, 1024, 2048]));
        assert_eq!(verdict.status, RuleStatus::Review);
        assert!(verdict.detail.contains("unequal"));
    }

    #[test]
    fn test_single_file_on_2022_is_ok() {
        let verdict = check_tempdb(&snapshot(16, 8, &[1024]));
        assert_eq!(verdict.status, RuleStatus::Ok);
    }

    #[test]
    fn test_single_file_before_2022_is_review() {
        let verdict = check_tempdb(&snapshot(15, 8, &[1024]));
        assert_eq!(verdict.status, RuleStatus::Review);
    }

    #[test]
    fn test_log_file_not_counted_as_data() {
        // Only the log file present: treated as no data files.
        let mut snapshot = snapshot(15, 8, &[]);
        let verdict = check_tempdb(&snapshot);
        assert_eq!(verdict.status, RuleStatus::Review);
        snapshot.tempdb = Collected::Unavailable;
        assert_eq!(check_tempdb(&snapshot).status, RuleStatus::Review);
    }
}
