use anyhow::Result;
use async_trait::async_trait;

use sqlfleet_domain::{InstanceIdentity, NamingConfig, Target};
use sqlfleet_ports::InstanceResolver;

/// Expands a target into instance identities from its configured instance
/// list, applying the fleet naming policy. A target without a domain of its
/// own inherits the configured suffix.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    naming: NamingConfig,
}

impl ConfigResolver {
    pub fn new(naming: NamingConfig) -> Self {
        Self { naming }
    }

    fn server_name(&self, target: &Target) -> String {
        let mut effective = target.clone();
        if effective.domain.is_none() {
            effective.domain = self.naming.domain_suffix.clone();
        }
        effective.address(self.naming.use_fqdn)
    }
}

#[async_trait]
impl InstanceResolver for ConfigResolver {
    async fn resolve(&self, target: &Target) -> Result<Vec<InstanceIdentity>> {
        let server = self.server_name(target);
        if target.instances.is_empty() {
            return Ok(vec![InstanceIdentity::default_instance(server)]);
        }
        Ok(target
            .instances
            .iter()
            .map(|instance| InstanceIdentity::new(server.clone(), instance.clone()))
            .collect())
    }
}
