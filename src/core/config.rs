use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_PRIVATBANK_URL: &str = "https://api.privatbank.ua";

/// What the aggregator does when a response lacks a requested currency.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingCurrencyPolicy {
    /// Log and omit the date.
    #[default]
    Skip,
    /// Stop the run with an extraction error.
    Abort,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrivatBankProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub privatbank: Option<PrivatBankProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            privatbank: Some(PrivatBankProviderConfig {
                base_url: DEFAULT_PRIVATBANK_URL.to_string(),
            }),
        }
    }
}

fn default_currencies() -> Vec<String> {
    vec!["EUR".to_string(), "USD".to_string()]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub on_missing_currency: MissingCurrencyPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            currencies: default_currencies(),
            on_missing_currency: MissingCurrencyPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ua", "privat-rates", "privat-rates")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.providers
            .privatbank
            .as_ref()
            .map_or(DEFAULT_PRIVATBANK_URL, |p| &p.base_url)
    }

    fn validate(&self) -> Result<()> {
        if self.currencies.is_empty() {
            bail!("At least one currency must be configured");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  privatbank:
    base_url: "http://example.com/pb"
currencies: ["USD", "PLN"]
on_missing_currency: abort
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.base_url(), "http://example.com/pb");
        assert_eq!(config.currencies, vec!["USD", "PLN"]);
        assert_eq!(config.on_missing_currency, MissingCurrencyPolicy::Abort);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.base_url(), DEFAULT_PRIVATBANK_URL);
        assert_eq!(config.currencies, vec!["EUR", "USD"]);
        assert_eq!(config.on_missing_currency, MissingCurrencyPolicy::Skip);

        let config: AppConfig = serde_yaml::from_str("providers:\n  privatbank: null\n").unwrap();
        assert_eq!(config.base_url(), DEFAULT_PRIVATBANK_URL);
    }

    #[test]
    fn test_load_from_path_rejects_empty_currencies() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "currencies: []\n").unwrap();

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("At least one currency"));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
    }
}
