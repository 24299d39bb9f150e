use std::path::PathBuf;

use anyhow::{Context, Result};

use sqlfleet_domain::Target;
use sqlfleet_ports::TargetSource;

/// Target list from a plain text file: one host per line, `host\inst1,inst2`
/// for named instances, `#` comments allowed.
#[derive(Debug, Clone)]
pub struct FileTargetSource {
    path: PathBuf,
}

impl FileTargetSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TargetSource for FileTargetSource {
    fn load(&self) -> Result<Vec<Target>> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading target list {}", self.path.display()))?;
        Ok(raw.lines().filter_map(Target::parse_line).collect())
    }
}

/// Targets given directly on the command line.
pub fn targets_from_args(specs: &[String]) -> Vec<Target> {
    specs
        .iter()
        .filter_map(|spec| Target::parse_line(spec))
        .collect()
}
