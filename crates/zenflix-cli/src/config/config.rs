//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;
use zenflix_api::catalog::{DEFAULT_BASE_URL, DEFAULT_RELAY_URL, Relay};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog endpoint settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Home page settings.
    #[serde(default)]
    pub home: HomeConfig,
}

/// Catalog endpoint configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog API base URL.
    pub base_url: String,
    /// Relay base URL; requests go to `<relay_url>/raw?url=<target>`.
    pub relay_url: String,
    /// Bypass the relay and call the catalog directly.
    pub direct: bool,
    /// Response language (e.g. `en-US`); API default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            relay_url: String::from(DEFAULT_RELAY_URL),
            direct: false,
            language: None,
        }
    }
}

impl CatalogConfig {
    /// Parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .with_context(|| format!("invalid catalog.base_url: {}", self.base_url))
    }

    /// Relay selected by `direct` and `relay_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `relay_url` is not a valid URL.
    pub fn relay(&self) -> Result<Relay> {
        if self.direct {
            return Ok(Relay::Direct);
        }
        let url = Url::parse(&self.relay_url)
            .with_context(|| format!("invalid catalog.relay_url: {}", self.relay_url))?;
        Ok(Relay::Proxy(url))
    }
}

/// Home page configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HomeConfig {
    /// Delay before the hero banner is fully shown, in milliseconds.
    pub hero_reveal_ms: u64,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { hero_reveal_ms: 100 }
    }
}

impl HomeConfig {
    /// Hero reveal delay.
    #[must_use]
    pub const fn hero_reveal(&self) -> Duration {
        Duration::from_millis(self.hero_reveal_ms)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3/");
        assert_eq!(config.catalog.relay_url, "https://api.allorigins.win");
        assert!(!config.catalog.direct);
        assert_eq!(config.home.hero_reveal(), Duration::from_millis(100));
    }

    #[test]
    fn test_default_relay_is_proxy() {
        // Arrange
        let config = CatalogConfig::default();

        // Act
        let relay = config.relay().unwrap();

        // Assert
        assert!(matches!(relay, Relay::Proxy(url) if url.as_str() == "https://api.allorigins.win/"));
    }

    #[test]
    fn test_direct_overrides_relay_url() {
        // Arrange
        let config = CatalogConfig {
            direct: true,
            ..CatalogConfig::default()
        };

        // Act & Assert
        assert_eq!(config.relay().unwrap(), Relay::Direct);
    }

    #[test]
    fn test_invalid_relay_url() {
        // Arrange
        let config = CatalogConfig {
            relay_url: String::from("not a url"),
            ..CatalogConfig::default()
        };

        // Act
        let err = config.relay().unwrap_err();

        // Assert
        assert!(err.to_string().contains("catalog.relay_url"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            catalog: CatalogConfig {
                language: Some(String::from("ja-JP")),
                direct: true,
                ..CatalogConfig::default()
            },
            home: HomeConfig { hero_reveal_ms: 0 },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nlanguage = \"en-US\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.catalog.language.as_deref(), Some("en-US"));
        assert_eq!(config.catalog.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.home, HomeConfig::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog\n").unwrap();

        // Act
        let err = AppConfig::load(&path).unwrap_err();

        // Assert
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
