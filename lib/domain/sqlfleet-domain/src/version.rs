use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Engine generation, keyed by the major ordinal of the product version.
/// Unrecognized ordinals stay visible as `Unknown` so policy tables can
/// refuse them explicitly instead of falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineVersion {
    Sql2012,
    Sql2014,
    Sql2016,
    Sql2017,
    Sql2019,
    Sql2022,
    Unknown(u32),
}

impl EngineVersion {
    pub fn from_major(major: u32) -> Self {
        match major {
            11 => Self::Sql2012,
            12 => Self::Sql2014,
            13 => Self::Sql2016,
            14 => Self::Sql2017,
            15 => Self::Sql2019,
            16 => Self::Sql2022,
            other => Self::Unknown(other),
        }
    }

    pub fn major(self) -> u32 {
        match self {
            Self::Sql2012 => 11,
            Self::Sql2014 => 12,
            Self::Sql2016 => 13,
            Self::Sql2017 => 14,
            Self::Sql2019 => 15,
            Self::Sql2022 => 16,
            Self::Unknown(other) => other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sql2012 => "SQL Server 2012",
            Self::Sql2014 => "SQL Server 2014",
            Self::Sql2016 => "SQL Server 2016",
            Self::Sql2017 => "SQL Server 2017",
            Self::Sql2019 => "SQL Server 2019",
            Self::Sql2022 => "SQL Server 2022",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Default compatibility level each generation assigns to new databases.
    pub fn native_compat_level(self) -> Option<u32> {
        match self {
            Self::Sql2012 => Some(110),
            Self::Sql2014 => Some(120),
            Self::Sql2016 => Some(130),
            Self::Sql2017 => Some(140),
            Self::Sql2019 => Some(150),
            Self::Sql2022 => Some(160),
            Self::Unknown(_) => None,
        }
    }

    /// Trace flags operations policy requires enabled on this generation.
    /// `None` for generations without a defined policy.
    pub fn required_trace_flags(self) -> Option<BTreeSet<u32>> {
        let flags: &[u32] = match self {
            Self::Sql2012 | Self::Sql2014 => &[1118, 4199],
            Self::Sql2016 => &[4199, 7745],
            Self::Sql2017 | Self::Sql2019 => &[4199, 7745, 12310],
            Self::Sql2022 => &[4199, 7745, 12656, 12618],
            Self::Unknown(_) => return None,
        };
        Some(flags.iter().copied().collect())
    }

    /// Whether the single-tempdb-file layout is acceptable (2022 onward).
    /// Unknown generations get no exception.
    pub fn allows_single_tempdb_file(self) -> bool {
        match self {
            Self::Unknown(_) => false,
            known => known.major() >= 16,
        }
    }
}
