use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// All runtime knobs, threaded explicitly into the components that need
/// them. Loaded from YAML; every section has workable defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub collection: CollectionConfig,
    pub naming: NamingConfig,
    pub sqlcmd: SqlcmdConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Upper bound on one metric-category call against one instance.
    pub timeout_secs: u64,
    /// Bounded worker pool size for target fan-out.
    pub max_concurrent_targets: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 600,
            max_concurrent_targets: 8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Suffix applied to targets that do not carry their own.
    pub domain_suffix: Option<String>,
    /// Address hosts by fully qualified name.
    pub use_fqdn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlcmdConfig {
    /// Client binary used for the command channel.
    pub binary: String,
}

impl Default for SqlcmdConfig {
    fn default() -> Self {
        Self {
            binary: "sqlcmd".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("sqlfleet-results.csv"),
        }
    }
}

impl FleetConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
