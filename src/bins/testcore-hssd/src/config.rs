//! HSS Configuration
//!
//! The ULR core reads a single immutable configuration: the Diameter
//! identity it answers with, the named subscription profiles, and an
//! optional default profile. It is loaded once from YAML and shared
//! read-only between request handlers.
//!
//! ```yaml
//! server:
//!   host: hss.epc.mnc001.mcc001.3gppnetwork.org
//!   realm: epc.mnc001.mcc001.3gppnetwork.org
//! sub_profiles:
//!   gold:
//!     max_ul_bit_rate: 50000000
//!     max_dl_bit_rate: 100000000
//! default_sub_profile:
//!   max_ul_bit_rate: 20000000
//!   max_dl_bit_rate: 40000000
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Diameter identity placed in Origin-Host / Origin-Realm of every answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIdentity {
    pub host: String,
    pub realm: String,
}

/// Bandwidth granted to a subscriber, in bits per second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionProfile {
    pub max_ul_bit_rate: u32,
    pub max_dl_bit_rate: u32,
}

/// HSS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HssConfig {
    pub server: ServerIdentity,
    #[serde(default)]
    pub sub_profiles: HashMap<String, SubscriptionProfile>,
    #[serde(default)]
    pub default_sub_profile: Option<SubscriptionProfile>,
}

impl HssConfig {
    pub fn new(server: ServerIdentity) -> Self {
        Self {
            server,
            sub_profiles: HashMap::new(),
            default_sub_profile: None,
        }
    }

    pub fn with_profile(mut self, name: &str, profile: SubscriptionProfile) -> Self {
        self.sub_profiles.insert(name.to_string(), profile);
        self
    }

    pub fn with_default_profile(mut self, profile: SubscriptionProfile) -> Self {
        self.default_sub_profile = Some(profile);
        self
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: HssConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loaded HSS configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host is empty".to_string()));
        }
        if self.server.realm.trim().is_empty() {
            return Err(ConfigError::Invalid("server.realm is empty".to_string()));
        }
        Ok(())
    }
}
