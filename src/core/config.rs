use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_PRICES_URL: &str = "https://interview.switcheo.com/prices.json";
pub const DEFAULT_ICONS_BASE_URL: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PriceSourceConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IconsConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub prices: Option<PriceSourceConfig>,
    pub icons: Option<IconsConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            prices: Some(PriceSourceConfig {
                url: DEFAULT_PRICES_URL.to_string(),
            }),
            icons: Some(IconsConfig {
                base_url: DEFAULT_ICONS_BASE_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config from the default location, or the built-in defaults
    /// when no config file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "tconv", "tconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn prices_url(&self) -> &str {
        self.providers
            .prices
            .as_ref()
            .map_or(DEFAULT_PRICES_URL, |p| &p.url)
    }

    pub fn icons_base_url(&self) -> &str {
        self.providers
            .icons
            .as_ref()
            .map_or(DEFAULT_ICONS_BASE_URL, |p| &p.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  prices:
    url: "http://example.com/prices.json"
  icons:
    base_url: "http://example.com/icons"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.prices_url(), "http://example.com/prices.json");
        assert_eq!(config.icons_base_url(), "http://example.com/icons");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let yaml_str = r#"
providers:
  prices:
    url: "http://example.com/prices.json"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.prices_url(), "http://example.com/prices.json");
        assert!(config.providers.icons.is_none());
        assert_eq!(config.icons_base_url(), DEFAULT_ICONS_BASE_URL);
    }

    #[test]
    fn test_empty_providers_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.prices_url(), DEFAULT_PRICES_URL);
        assert_eq!(config.icons_base_url(), DEFAULT_ICONS_BASE_URL);
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(
            file.path(),
            "providers:\n  prices:\n    url: \"http://localhost:1234/prices.json\"\n",
        )?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.prices_url(), "http://localhost:1234/prices.json");

        let missing = AppConfig::load_from_path(file.path().with_extension("missing"));
        assert!(missing.is_err());
        Ok(())
    }
}
