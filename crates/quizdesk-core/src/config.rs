//! Application configuration management.
//!
//! The backend origin is fixed at build time: debug builds talk to the local
//! development backend, release builds to `QUIZDESK_API_URL`. Everything the
//! user can change lives in `~/.config/quizdesk/config.json`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{FileTokenStore, KeyringTokenStore, TokenStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "quizdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend used by development builds.
pub const DEV_API_URL: &str = "http://localhost:5000";

/// Where the bearer token is kept between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorage {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub last_email: Option<String>,
    #[serde(default)]
    pub token_storage: TokenStorage,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the token file and logs.
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }

    /// The token store selected by `token_storage`.
    pub fn token_store(&self) -> Result<Arc<dyn TokenStore>> {
        Ok(match self.token_storage {
            TokenStorage::File => Arc::new(FileTokenStore::new(&Self::data_dir()?)),
            TokenStorage::Keyring => Arc::new(KeyringTokenStore),
        })
    }

    /// Backend origin for this build.
    pub fn api_base_url() -> Result<String> {
        resolve_api_url(cfg!(debug_assertions), option_env!("QUIZDESK_API_URL"))
    }
}

fn resolve_api_url(debug_build: bool, deployed: Option<&str>) -> Result<String> {
    if debug_build {
        return Ok(DEV_API_URL.to_string());
    }
    deployed
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
        .context("QUIZDESK_API_URL was not set when this release was built")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_selection() {
        assert_eq!(resolve_api_url(true, Some("https://x.test")).unwrap(), DEV_API_URL);
        assert_eq!(
            resolve_api_url(false, Some("https://quiz.example.com/")).unwrap(),
            "https://quiz.example.com"
        );
        assert!(resolve_api_url(false, None).is_err());
        assert!(resolve_api_url(false, Some("  ")).is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_str(r#"{"last_email":"a@b.c"}"#).unwrap();
        assert_eq!(config.token_storage, TokenStorage::File);
        assert_eq!(config.last_email.as_deref(), Some("a@b.c"));

        let config: Config =
            serde_json::from_str(r#"{"last_email":null,"token_storage":"keyring"}"#).unwrap();
        assert_eq!(config.token_storage, TokenStorage::Keyring);
    }
}
