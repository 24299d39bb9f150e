//! Parsers for the pipe-delimited sqlcmd output of each category query.
//! Malformed rows are skipped; a malformed scalar snapshot parses to `None`
//! and degrades upstream to an unavailable category.

use chrono::{DateTime, NaiveDateTime, Utc};

use sqlfleet_domain::{
    BackupStatus, CheckDbStatus, ConfigValues, DatabaseOptions, FileGrowth, RecoveryModel,
    ServerInfo, TempFile,
};

fn rows(raw: &str) -> impl Iterator<Item = Vec<&str>> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split('|').map(str::trim).collect())
}

fn parse_flag(field: &str) -> Option<bool> {
    match field {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    if field.eq_ignore_ascii_case("NULL") {
        return None;
    }
    NaiveDateTime::parse_from_str(field, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn parse_server_info(raw: &str) -> Option<ServerInfo> {
    let row = rows(raw).next()?;
    let &[version, edition, memory, schedulers, numa] = row.as_slice() else {
        return None;
    };
    Some(ServerInfo {
        product_version: version.to_string(),
        edition: edition.to_string(),
        physical_memory_mb: memory.parse().ok()?,
        scheduler_count: schedulers.parse().ok()?,
        numa_node_count: numa.parse().ok()?,
    })
}

pub fn parse_config_values(raw: &str) -> Option<ConfigValues> {
    let mut min_memory = None;
    let mut max_memory = None;
    let mut max_dop = None;
    let mut adhoc = None;
    let mut remote_admin = None;
    let mut compression = None;

    for row in rows(raw) {
        let &[name, value] = row.as_slice() else {
            continue;
        };
        match name {
            "min server memory (MB)" => min_memory = value.parse().ok(),
            "max server memory (MB)" => max_memory = value.parse().ok(),
            "max degree of parallelism" => max_dop = value.parse().ok(),
            "optimize for ad hoc workloads" => adhoc = parse_flag(value),
            "remote admin connections" => remote_admin = parse_flag(value),
            "backup compression default" => compression = parse_flag(value),
            _ => {}
        }
    }

    Some(ConfigValues {
        min_server_memory_mb: min_memory?,
        max_server_memory_mb: max_memory?,
        max_dop: max_dop?,
        optimize_adhoc: adhoc?,
        remote_admin_connections: remote_admin?,
        backup_compression: compression,
    })
}

pub fn parse_database_options(raw: &str) -> Vec<DatabaseOptions> {
    rows(raw)
        .filter_map(|row| {
            let &[name, create, update, verify, compat, vlf] = row.as_slice() else {
                return None;
            };
            Some(DatabaseOptions {
                name: name.to_string(),
                auto_create_stats: parse_flag(create)?,
                auto_update_stats: parse_flag(update)?,
                page_verify: verify.to_string(),
                compatibility_level: compat.parse().ok()?,
                vlf_count: vlf.parse().ok()?,
            })
        })
        .collect()
}

pub fn parse_file_growth(raw: &str) -> Vec<FileGrowth> {
    rows(raw)
        .filter_map(|row| {
            let &[database, name, max_size, percent, growth] = row.as_slice() else {
                return None;
            };
            // max_size arrives in 8 KB pages; -1 stays the unlimited marker.
            let max_size_pages: i64 = max_size.parse().ok()?;
            Some(FileGrowth {
                database: database.to_string(),
                logical_name: name.to_string(),
                max_size_mb: if max_size_pages < 0 {
                    -1
                } else {
                    max_size_pages * 8 / 1024
                },
                is_percent_growth: parse_flag(percent)?,
                growth_mb: growth.parse().ok()?,
            })
        })
        .collect()
}

pub fn parse_trace_flags(raw: &str) -> Vec<u32> {
    rows(raw)
        .filter_map(|row| match row.as_slice() {
            &[flag] => flag.parse().ok(),
            _ => None,
        })
        .collect()
}

pub fn parse_checkdb_history(raw: &str) -> Vec<CheckDbStatus> {
    rows(raw)
        .filter_map(|row| {
            let &[database, checked] = row.as_slice() else {
                return None;
            };
            Some(CheckDbStatus {
                database: database.to_string(),
                last_known_good: parse_timestamp(checked)?,
            })
        })
        .collect()
}

pub fn parse_backup_history(raw: &str) -> Vec<BackupStatus> {
    rows(raw)
        .filter_map(|row| {
            let &[database, model, full, log] = row.as_slice() else {
                return None;
            };
            Some(BackupStatus {
                database: database.to_string(),
                recovery_model: RecoveryModel::parse(model)?,
                last_full: parse_timestamp(full),
                last_log: parse_timestamp(log),
            })
        })
        .collect()
}

pub fn parse_tempdb_files(raw: &str) -> Vec<TempFile> {
    rows(raw)
        .filter_map(|row| {
            let &[name, is_data, size] = row.as_slice() else {
                return None;
            };
            Some(TempFile {
                logical_name: name.to_string(),
                is_data_file: parse_flag(is_data)?,
                size_mb: size.parse().ok()?,
            })
        })
        .collect()
}
