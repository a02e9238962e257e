//! Provider configuration: `multicompute.toml` plus environment overrides.
//!
//! ```toml
//! use_mock = false
//!
//! [live]
//! server = "dashboard.internal:8080"
//! base_path = "/api/v1"
//!
//! [live.headers]
//! x-tenant = "gpu-team"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::factory::create_data_provider;
use crate::provider::DataProvider;

/// Only the literal `false` selects the live source.
pub const ENV_USE_MOCK: &str = "MULTICOMPUTE_USE_MOCK";
pub const ENV_SERVER: &str = "MULTICOMPUTE_SERVER";
pub const ENV_BASE_PATH: &str = "MULTICOMPUTE_BASE_PATH";

pub const DEFAULT_SERVER: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_PATH: &str = "/api/v1";

/// Where the live provider sends requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LiveConfig {
    /// `host:port` of the REST backend.
    pub server: String,
    /// Prefix prepended to every endpoint path.
    pub base_path: String,
    /// Extra request headers; these override the JSON content-type.
    pub headers: BTreeMap<String, String>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            headers: BTreeMap::new(),
        }
    }
}

impl LiveConfig {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::default()
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Base path with exactly one leading slash and no trailing slash.
    /// An empty or `/` base path normalizes to the empty string.
    pub fn normalized_base_path(&self) -> String {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}

/// Top-level provider selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub use_mock: bool,
    pub live: LiveConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            use_mock: true,
            live: LiveConfig::default(),
        }
    }
}

impl ProviderConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(?path, use_mock = config.use_mock, "provider config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Defaults, then the file when given, then the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `MULTICOMPUTE_*` variables from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_USE_MOCK) {
            self.use_mock = value != "false";
        }
        if let Some(server) = lookup(ENV_SERVER) {
            self.live.server = server;
        }
        if let Some(base_path) = lookup(ENV_BASE_PATH) {
            self.live.base_path = base_path;
        }
    }

    /// Build the selected data source.
    pub fn into_provider(self) -> Arc<dyn DataProvider> {
        create_data_provider(self.use_mock, self.live)
    }
}
