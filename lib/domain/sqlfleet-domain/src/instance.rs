use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the unnamed instance on a host.
pub const DEFAULT_INSTANCE: &str = "DEFAULT";

/// (server, instance) pair identifying one assessed instance. The final
/// report holds at most one entry per identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceIdentity {
    pub server: String,
    pub instance: String,
}

impl InstanceIdentity {
    pub fn new(server: impl Into<String>, instance: impl Into<String>) -> Self {
        let instance = instance.into();
        Self {
            server: server.into(),
            instance: if instance.is_empty() {
                DEFAULT_INSTANCE.to_string()
            } else {
                instance
            },
        }
    }

    pub fn default_instance(server: impl Into<String>) -> Self {
        Self::new(server, DEFAULT_INSTANCE)
    }

    pub fn is_default(&self) -> bool {
        self.instance == DEFAULT_INSTANCE
    }

    /// Connection-string form: `server` for the default instance,
    /// `server\instance` otherwise.
    pub fn connection_name(&self) -> String {
        if self.is_default() {
            self.server.clone()
        } else {
            format!("{}\\{}", self.server, self.instance)
        }
    }
}

impl fmt::Display for InstanceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.connection_name())
    }
}
