use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use sqlfleet_domain::AssessmentRun;
use sqlfleet_ports::ReportSink;
use sqlfleet_ui_presentation::render_csv;

/// Writes the result table as CSV.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReportSink for CsvFileSink {
    fn export(&self, run: &AssessmentRun) -> Result<()> {
        std::fs::write(&self.path, render_csv(run))
            .with_context(|| format!("writing result table {}", self.path.display()))?;
        info!(path = %self.path.display(), reports = run.reports.len(), "result table written");
        Ok(())
    }
}
