//! Network registry and lookup.

use thiserror::Error;
use url::Url;

use crate::blockchain::types::ChainId;
use crate::config::schema::NetworkConfig;

/// Errors raised by registry construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Index outside `[0, len)`, or a menu choice outside `[1, len]`.
    #[error("network selection {selection} is out of range (1-{len})")]
    IndexOutOfRange { selection: usize, len: usize },

    #[error("network '{name}' has invalid RPC URL: {reason}")]
    InvalidUrl { name: String, reason: String },

    #[error("network registry is empty")]
    Empty,
}

/// A named blockchain endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    pub rpc_url: Url,
    pub chain_id: ChainId,
    /// Read-only fallbacks, tried after `rpc_url`.
    pub failover_urls: Vec<Url>,
}

impl Network {
    /// Filesystem-safe report name: lowercase alphanumerics, separators collapsed to `-`.
    pub fn report_slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        for c in self.name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') && !slug.is_empty() {
                slug.push('-');
            }
        }
        match slug.trim_end_matches('-') {
            "" => format!("chain-{}", self.chain_id.0),
            trimmed => trimmed.to_string(),
        }
    }

    /// Primary endpoint followed by failovers.
    pub fn endpoints(&self) -> impl Iterator<Item = &Url> {
        std::iter::once(&self.rpc_url).chain(self.failover_urls.iter())
    }
}

impl TryFrom<&NetworkConfig> for Network {
    type Error = RegistryError;

    fn try_from(config: &NetworkConfig) -> Result<Self, Self::Error> {
        let parse = |raw: &str| {
            Url::parse(raw).map_err(|e| RegistryError::InvalidUrl {
                name: config.name.clone(),
                reason: format!("'{}': {}", raw, e),
            })
        };

        Ok(Self {
            name: config.name.clone(),
            rpc_url: parse(&config.rpc_url)?,
            chain_id: ChainId(config.chain_id),
            failover_urls: config
                .failover_urls
                .iter()
                .map(|u| parse(u))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Ordered, immutable catalog of supported networks.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    networks: Vec<Network>,
}

impl NetworkRegistry {
    /// Build the registry from validated configuration entries.
    pub fn from_config(entries: &[NetworkConfig]) -> Result<Self, RegistryError> {
        let networks = entries
            .iter()
            .map(Network::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(networks)
    }

    pub fn new(networks: Vec<Network>) -> Result<Self, RegistryError> {
        if networks.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { networks })
    }

    /// All networks in catalog order.
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Lookup by 0-based index.
    pub fn network_at(&self, index: usize) -> Result<&Network, RegistryError> {
        self.networks
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange {
                selection: index.saturating_add(1),
                len: self.networks.len(),
            })
    }

    /// Lookup by 1-based menu choice.
    pub fn select(&self, choice: usize) -> Result<&Network, RegistryError> {
        match choice.checked_sub(1) {
            Some(index) => self.network_at(index),
            None => Err(RegistryError::IndexOutOfRange {
                selection: choice,
                len: self.networks.len(),
            }),
        }
    }

    /// Numbered list as shown in the interactive menu.
    pub fn menu_lines(&self) -> Vec<String> {
        self.networks
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}. {}", i + 1, n.name))
            .collect()
    }
}
