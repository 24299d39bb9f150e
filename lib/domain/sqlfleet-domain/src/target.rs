use serde::{Deserialize, Serialize};

/// One host to assess, as read from the target list. Immutable after parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub host: String,
    /// Domain suffix to append when fully-qualified names are requested.
    pub domain: Option<String>,
    /// Named instances listed for this host; empty means the default instance.
    pub instances: Vec<String>,
}

impl Target {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            domain: None,
            instances: Vec::new(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Host name used to address the machine, fully qualified when the
    /// naming policy asks for it and a suffix is known.
    pub fn address(&self, use_fqdn: bool) -> String {
        match (&self.domain, use_fqdn) {
            (Some(domain), true) => format!("{}.{}", self.host, domain),
            _ => self.host.clone(),
        }
    }

    /// Parse a target-list line: `host`, `host.domain.tld`, or
    /// `host\inst1,inst2`. Lines are trimmed; `#` starts a comment.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return None;
        }

        let (host_part, instance_part) = match line.split_once('\\') {
            Some((host, rest)) => (host.trim(), Some(rest.trim())),
            None => (line, None),
        };

        let (host, domain) = match host_part.split_once('.') {
            Some((short, suffix)) if !suffix.is_empty() => {
                (short.to_string(), Some(suffix.to_string()))
            }
            _ => (host_part.to_string(), None),
        };

        let instances = instance_part
            .map(|part| {
                part.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            host,
            domain,
            instances,
        })
    }
}
