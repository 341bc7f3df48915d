//! Configuration for progress scopes

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// How a registry mints identities for new reporters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityScheme {
    /// Time-ordered UUID (v7) per reporter
    #[default]
    Uuid,
    /// Monotonic counter local to the registry
    Sequential,
}

/// Scope configuration
///
/// Hosts typically embed this in their own config file and hand the parsed
/// value to [`crate::Scope::with_progress_receiver_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Identity scheme for reporters obtained from the scope
    #[serde(default)]
    pub identity: IdentityScheme,
}

impl Config {
    /// Parse config from YAML text; blank input gives the defaults
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse progress config")
    }

    /// Render config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize progress config")
    }

    pub fn with_identity(mut self, identity: IdentityScheme) -> Self {
        self.identity = identity;
        self
    }
}
