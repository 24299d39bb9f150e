//! Diagnostic queries, one per metric category. Columns are pipe-separated
//! by the sqlcmd invocation; the parsers in `parse` mirror these column
//! lists exactly.

pub const SERVER_INFO: &str = "SET NOCOUNT ON; \
SELECT CAST(SERVERPROPERTY('ProductVersion') AS nvarchar(32)), \
CAST(SERVERPROPERTY('Edition') AS nvarchar(64)), \
(SELECT total_physical_memory_kb / 1024 FROM sys.dm_os_sys_memory), \
(SELECT COUNT(*) FROM sys.dm_os_schedulers WHERE status = 'VISIBLE ONLINE'), \
(SELECT COUNT(DISTINCT parent_node_id) FROM sys.dm_os_schedulers WHERE status = 'VISIBLE ONLINE');";

pub const CONFIG_VALUES: &str = "SET NOCOUNT ON; \
SELECT name, CAST(value_in_use AS bigint) FROM sys.configurations \
WHERE name IN ('min server memory (MB)', 'max server memory (MB)', \
'max degree of parallelism', 'optimize for ad hoc workloads', \
'remote admin connections', 'backup compression default');";

pub const DATABASE_OPTIONS: &str = "SET NOCOUNT ON; \
SELECT d.name, d.is_auto_create_stats_on, d.is_auto_update_stats_on, \
d.page_verify_option_desc, d.compatibility_level, \
(SELECT COUNT(*) FROM sys.dm_db_log_info(d.database_id)) \
FROM sys.databases d WHERE d.state_desc = 'ONLINE';";

pub const FILE_GROWTH: &str = "SET NOCOUNT ON; \
SELECT DB_NAME(database_id), name, max_size, is_percent_growth, \
CAST(growth AS bigint) * 8 / 1024 \
FROM sys.master_files WHERE database_id > 4;";

pub const TRACE_FLAGS: &str = "SET NOCOUNT ON; \
CREATE TABLE #flags (flag int, stat int, glob int, sess int); \
INSERT INTO #flags EXEC ('DBCC TRACESTATUS(-1) WITH NO_INFOMSGS'); \
SELECT flag FROM #flags WHERE glob = 1;";

pub const CHECKDB_HISTORY: &str = "SET NOCOUNT ON; \
SELECT name, CONVERT(varchar(19), \
ISNULL(DATABASEPROPERTYEX(name, 'LastGoodCheckDbTime'), '1900-01-01'), 120) \
FROM sys.databases WHERE state_desc = 'ONLINE';";

pub const BACKUP_HISTORY: &str = "SET NOCOUNT ON; \
SELECT d.name, d.recovery_model_desc, \
CONVERT(varchar(19), f.full_finish, 120), CONVERT(varchar(19), l.log_finish, 120) \
FROM sys.databases d \
OUTER APPLY (SELECT MAX(backup_finish_date) AS full_finish \
FROM msdb.dbo.backupset WHERE database_name = d.name AND type = 'D') f \
OUTER APPLY (SELECT MAX(backup_finish_date) AS log_finish \
FROM msdb.dbo.backupset WHERE database_name = d.name AND type = 'L') l \
WHERE d.name <> 'tempdb' AND d.state_desc = 'ONLINE';";

pub const TEMPDB_FILES: &str = "SET NOCOUNT ON; \
SELECT name, CASE WHEN type = 0 THEN 1 ELSE 0 END, \
CAST(size AS bigint) * 8 / 1024 \
FROM tempdb.sys.database_files;";
