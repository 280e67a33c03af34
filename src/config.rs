//! User configuration
//!
//! Settings are read from `config.toml` in the platform config directory,
//! then overridden by environment variables and finally by CLI flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::gitlab::client::DEFAULT_GITLAB_HOST;

pub const TOKEN_ENV_VAR: &str = "GITLAB_TOKEN";
pub const HOST_ENV_VAR: &str = "GITLAB_HOST";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Home or config directory could not be determined
    NoConfigDirectory,
    /// IO error while reading the file
    IoError(String),
    /// The file is not valid TOML for [`Config`]
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoConfigDirectory => write!(f, "Unable to determine config directory"),
            Self::IoError(msg) => write!(f, "IO error: {}", msg),
            Self::ParseError(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitLab instance URL, e.g. "https://gitlab.example.com"
    pub host: Option<String>,
    /// Personal access token sent as `PRIVATE-TOKEN`
    pub token: Option<String>,
    /// Repository used when neither `--repo` nor a git remote names one
    pub default_repo: Option<String>,
    /// Pager command; empty string disables paging
    pub pager: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load from `path`. A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_dir()?.join(CONFIG_FILE_NAME);
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// `GITLAB_TOKEN` and `GITLAB_HOST` take precedence over the file
    pub fn apply_env(&mut self) {
        if let Some(token) = non_empty_env(TOKEN_ENV_VAR) {
            self.token = Some(token);
        }
        if let Some(host) = non_empty_env(HOST_ENV_VAR) {
            self.host = Some(host);
        }
    }

    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_GITLAB_HOST)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
    Ok(config_dir.join("gitlab-issue-list"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.host_or_default(), "https://gitlab.com");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
host = "https://gitlab.example.com"
token = "glpat-123"
default_repo = "group/project"
pager = ""
request_timeout_secs = 5
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.host_or_default(), "https://gitlab.example.com");
        assert_eq!(config.token.as_deref(), Some("glpat-123"));
        assert_eq!(config.default_repo.as_deref(), Some("group/project"));
        assert_eq!(config.pager.as_deref(), Some(""));
        assert_eq!(config.request_timeout_secs, Some(5));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "host = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_values() {
        let mut config = Config {
            host: Some("https://file.example.com".to_string()),
            token: Some("file-token".to_string()),
            ..Config::default()
        };

        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::set_var(TOKEN_ENV_VAR, "env-token");
            std::env::set_var(HOST_ENV_VAR, "");
        }
        config.apply_env();
        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
            std::env::remove_var(HOST_ENV_VAR);
        }

        assert_eq!(config.token.as_deref(), Some("env-token"));
        assert_eq!(config.host.as_deref(), Some("https://file.example.com"));
    }
}
