//! Configuration for folio.
//!
//! Loaded from `~/.folio/config.json` when present, then overridden by
//! environment variables (a `.env` file is honoured by the binary). Every
//! section is `#[serde(default)]`, so partial files are fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FolioError, Result};

/// Default API base address.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default probability that a simulated contact submission succeeds.
pub const DEFAULT_SIMULATED_SUCCESS_RATE: f64 = 0.9;

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address every resource path is appended to.
    pub base_url: String,
    /// Per-request timeout; hitting it counts as a transport failure.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Static fixture fallback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Substitute fixtures for failed reads and simulate submissions.
    ///
    /// Turn off in non-demo builds so backend outages surface as errors.
    pub enabled: bool,
    /// Uniform simulated latency before a fixture is returned.
    ///
    /// `None` keeps the per-resource defaults; `Some(0)` disables the delay.
    pub delay_ms: Option<u64>,
    /// Probability in `[0.0, 1.0]` that a simulated contact submission succeeds.
    pub simulated_success_rate: f64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: None,
            simulated_success_rate: DEFAULT_SIMULATED_SUCCESS_RATE,
        }
    }
}

impl FixtureConfig {
    /// Resolve the simulated delay for an operation whose default is `default`.
    pub fn delay_or(&self, default: Duration) -> Duration {
        self.delay_ms.map(Duration::from_millis).unwrap_or(default)
    }
}

/// Client storage and locale watching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage file path. Defaults to `~/.folio/storage.json`.
    pub path: Option<PathBuf>,
    /// How often the locale watcher polls persisted storage.
    pub locale_poll_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            locale_poll_ms: 500,
        }
    }
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| Config::dir().join("storage.json"))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub fixtures: FixtureConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Configuration directory (`~/.folio`).
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".folio")
    }

    /// Default configuration file path.
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from the default path, apply env overrides and validate.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load from `path` (missing file means defaults), apply env overrides and validate.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                FolioError::Config(format!("Failed to read config at {:?}: {}", path, e))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                FolioError::Config(format!("Failed to parse config at {:?}: {}", path, e))
            })?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Config::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `FOLIO_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FOLIO_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("FOLIO_API_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            self.api.timeout_secs = secs;
        }
        if let Some(flag) = lookup("FOLIO_FIXTURE_FALLBACK") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.fixtures.enabled = true,
                "0" | "false" | "no" | "off" => self.fixtures.enabled = false,
                other => debug!(value = other, "Ignoring unrecognised FOLIO_FIXTURE_FALLBACK"),
            }
        }
    }

    /// Reject values the gateway cannot work with.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            FolioError::Config(format!("Invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FolioError::Config(format!(
                "api.base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(FolioError::Config(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        let rate = self.fixtures.simulated_success_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(FolioError::Config(format!(
                "fixtures.simulated_success_rate must be within [0, 1], got {}",
                rate
            )));
        }
        if self.storage.locale_poll_ms == 0 {
            return Err(FolioError::Config(
                "storage.locale_poll_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "http://localhost:3001/api");
        assert_eq!(cfg.api.timeout_secs, 10);
        assert!(cfg.fixtures.enabled);
        assert_eq!(cfg.fixtures.delay_ms, None);
        assert_eq!(cfg.fixtures.simulated_success_rate, 0.9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let json = r#"{"api": {"timeout_secs": 3}, "fixtures": {"enabled": false}}"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.api.timeout_secs, 3);
        assert_eq!(cfg.api.base_url, DEFAULT_API_URL); // default
        assert!(!cfg.fixtures.enabled);
        assert_eq!(cfg.fixtures.simulated_success_rate, 0.9); // default
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = Config::load_from_path(&tmp.path().join("absent.json")).unwrap();
        assert_eq!(cfg.api.timeout_secs, Config::default().api.timeout_secs);
    }

    #[test]
    fn test_load_rejects_corrupt_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, FolioError::Config(ref m) if m.contains("Failed to parse")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.api.base_url = "ftp://example.com".into();
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.api.base_url = "not a url".into();
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.api.timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.fixtures.simulated_success_rate = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("FOLIO_API_URL", " https://api.example.com/v1 "),
            ("FOLIO_API_TIMEOUT_SECS", "4"),
            ("FOLIO_FIXTURE_FALLBACK", "off"),
        ]);
        let mut cfg = Config::default();
        cfg.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(cfg.api.base_url, "https://api.example.com/v1");
        assert_eq!(cfg.api.timeout_secs, 4);
        assert!(!cfg.fixtures.enabled);
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("FOLIO_API_URL", "   "),
            ("FOLIO_API_TIMEOUT_SECS", "soon"),
            ("FOLIO_FIXTURE_FALLBACK", "maybe"),
        ]);
        let mut cfg = Config::default();
        cfg.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_fixture_delay_override() {
        let mut fixtures = FixtureConfig::default();
        assert_eq!(
            fixtures.delay_or(Duration::from_millis(600)),
            Duration::from_millis(600)
        );
        fixtures.delay_ms = Some(0);
        assert_eq!(fixtures.delay_or(Duration::from_millis(600)), Duration::ZERO);
    }
}
