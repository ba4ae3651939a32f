//! Suite configuration.
//!
//! Values are layered, lowest precedence first: built-in defaults, an optional
//! TOML file, `SPOILER_*` environment variables, then command-line flags.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";

// Shared test account of the public training instance.
pub const DEFAULT_USERNAME: &str = "AHTOH40";
pub const DEFAULT_PASSWORD: &str = "AHTOH40";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "SPOILER_BASE_URL";
pub const ENV_USERNAME: &str = "SPOILER_USERNAME";
pub const ENV_PASSWORD: &str = "SPOILER_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub connect_timeout_secs: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    connect_timeout_secs: Option<u64>,
}

impl SuiteConfig {
    /// Config pointed at `base_url` with the default credentials.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolve the full configuration from every layer.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            config.apply_file(path)?;
        }
        config.apply_env(|key| env::var(key).ok());
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        self.apply_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(content)?;
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(username) = file.username {
            self.username = username;
        }
        if let Some(password) = file.password {
            self.password = password;
        }
        if let Some(secs) = file.connect_timeout_secs {
            self.connect_timeout_secs = secs;
        }
        Ok(())
    }

    /// Apply environment overrides through `lookup` so callers can swap the
    /// process environment for a fixed map.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(username) = &overrides.username {
            self.username = username.clone();
        }
        if let Some(password) = &overrides.password {
            self.password = password.clone();
        }
    }

    /// Check the base URL and strip any trailing slash.
    pub fn validate(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("Base URL cannot be empty");
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            bail!("Base URL must start with http:// or https://: {trimmed}");
        }
        self.base_url = trimmed.to_string();
        Ok(())
    }
}
