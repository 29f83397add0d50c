use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_STALE_AFTER_SECS: u64 = 30;
const SESSION_FILE: &str = "taskdeck/session.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    FSError(#[from] std::io::Error),
    #[error(transparent)]
    SerdeError(#[from] toml::de::Error),
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    fn is_valid(&self) -> bool {
        Url::parse(&self.base_url)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SessionConfig {
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    /// The configured file, else `$XDG_CONFIG_HOME` or `~/.config`.
    pub fn path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }

        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        config_home.join(SESSION_FILE)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CacheConfig {
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

fn default_stale_after_secs() -> u64 {
    DEFAULT_STALE_AFTER_SECS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: DEFAULT_STALE_AFTER_SECS,
        }
    }
}

impl CacheConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    pub fn parse(path: Option<String>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or("config.toml".to_string());
        let path = Path::new(path.as_str());
        let config_text = fs::read_to_string(path)?;

        Self::from_toml(config_text.as_str())
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;

        Ok(config)
    }

    pub fn is_valid(&self) -> bool {
        self.api.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = Config::from_toml(
            r#"
[api]
base_url = "https://api.taskdeck.app/v1"
"#,
        )
        .unwrap();

        assert!(config.is_valid());
        assert_eq!(Duration::from_secs(15), config.api.timeout());
        assert_eq!(Duration::from_secs(30), config.cache.stale_after());
        assert!(config.session.path().ends_with("taskdeck/session.json"));
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
[api]
base_url = "http://localhost:3000"
timeout_secs = 3

[session]
path = "/tmp/taskdeck-session.json"

[cache]
stale_after_secs = 0
"#,
        )
        .unwrap();

        assert_eq!(Duration::from_secs(3), config.api.timeout());
        assert_eq!(
            PathBuf::from("/tmp/taskdeck-session.json"),
            config.session.path()
        );
        assert_eq!(Duration::ZERO, config.cache.stale_after());
    }

    #[test]
    fn test_invalid_base_url() {
        for base_url in ["", "localhost:3000", "ftp://files.example.com", "not a url"] {
            let config = Config {
                api: ApiConfig {
                    base_url: base_url.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            };

            assert!(!config.is_valid(), "{base_url} should be rejected");
        }
    }

    #[test]
    fn test_missing_api_section() {
        assert!(matches!(
            Config::from_toml("[cache]\nstale_after_secs = 5\n"),
            Err(ConfigError::SerdeError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::parse(Some("/definitely/not/here.toml".to_string())),
            Err(ConfigError::FSError(_))
        ));
    }
}
