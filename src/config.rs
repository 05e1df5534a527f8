use std::ffi::OsString;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub jira: JiraConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct JiraConfig {
    pub api_root: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub file: String,
    #[serde(default)]
    pub preamble: Option<String>,
    pub issue_format: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found at {path}. expected at $XDG_CONFIG_HOME/jira-outline/config.toml or ~/.config/jira-outline/config.toml")]
    MissingConfigFile { path: PathBuf },
    #[error("failed to resolve config path: HOME is not set and XDG_CONFIG_HOME is unset")]
    MissingHomeDirectory,
    #[error("failed to read config file at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse TOML config at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub fn load() -> Result<AppConfig, ConfigError> {
    let path = resolve_config_path()?;
    load_from(&path)
}

pub fn load_from(path: &std::path::Path) -> Result<AppConfig, ConfigError> {
    let path = path.to_path_buf();
    let raw = std::fs::read_to_string(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::MissingConfigFile { path: path.clone() }
        } else {
            ConfigError::ReadFailed {
                path: path.clone(),
                source,
            }
        }
    })?;

    let cfg = toml::from_str::<AppConfig>(&raw).map_err(|source| ConfigError::ParseFailed {
        path: path.clone(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME");
    let home = std::env::var_os("HOME");
    resolve_config_path_from_env(xdg_config_home, home)
}

fn resolve_config_path_from_env(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = xdg_config_home.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir).join("jira-outline").join("config.toml"));
    }

    let home = home
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("jira-outline")
        .join("config.toml"))
}

impl AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.jira.api_root.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "jira.api_root must not be empty".into(),
            ));
        }
        if self.jira.username.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "jira.username must not be empty".into(),
            ));
        }
        if self.jira.password.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "jira.password must not be empty".into(),
            ));
        }
        if self.output.file.trim().is_empty() {
            return Err(ConfigError::Invalid("output.file must not be empty".into()));
        }
        if self.output.issue_format.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "output.issue_format must not be empty".into(),
            ));
        }

        Ok(())
    }
}
