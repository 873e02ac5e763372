use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use notegate_core::store::{DEFAULT_CAPACITY, DEFAULT_DELIMITER, DEFAULT_STORE_PATH};
use notegate_core::LoaderLimits;

use crate::cli::Cli;
use crate::constants::DEFAULT_SECRET;
use crate::errors::CliError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotegateConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub access: AccessSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub path: Option<String>,
    pub capacity: Option<usize>,
    pub delimiter: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessSection {
    pub secret: Option<String>,
}

impl std::fmt::Debug for AccessSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessSection")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Effective settings for one run.
pub struct Settings {
    pub store_path: PathBuf,
    pub limits: LoaderLimits,
    pub secret: SecretString,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotegateConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    parse_config(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn parse_config(contents: &str) -> Result<NotegateConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load the config file named on the command line, or the default one if present.
///
/// An explicitly named file must exist; a missing default file means "no config".
pub fn load_config(cli: &Cli) -> Result<NotegateConfig, CliError> {
    if let Some(path) = cli.config.as_ref() {
        if !path.exists() {
            return Err(CliError::not_found(
                format!("Config file not found: {}", path.display()),
                "Hint: Check --config or NOTEGATE_CONFIG.",
            ));
        }
        return read_config(path).map_err(|e| CliError::invalid_input(e.to_string()));
    }

    let path = match default_config_path() {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(error = %err, "no default config location");
            return Ok(NotegateConfig::default());
        }
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file");
        return Ok(NotegateConfig::default());
    }
    tracing::debug!(path = %path.display(), "reading config");
    read_config(&path).map_err(|e| CliError::invalid_input(e.to_string()))
}

/// Merge flags, config, and built-in defaults. Flags win over config.
pub fn resolve_settings(cli: &Cli, config: NotegateConfig) -> Result<Settings, CliError> {
    let store_path = cli
        .store
        .clone()
        .or_else(|| config.store.path.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

    let capacity = config.store.capacity.unwrap_or(DEFAULT_CAPACITY);
    let delimiter = match config.store.delimiter.as_deref() {
        Some(value) => parse_delimiter(value)?,
        None => DEFAULT_DELIMITER,
    };
    let limits = LoaderLimits::new(capacity, delimiter)?;

    let secret = SecretString::from(
        config
            .access
            .secret
            .unwrap_or_else(|| DEFAULT_SECRET.to_string()),
    );

    Ok(Settings {
        store_path,
        limits,
        secret,
    })
}

fn parse_delimiter(value: &str) -> Result<u8, CliError> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(CliError::invalid_input(format!(
            "Invalid delimiter \"{}\": expected a single ASCII character",
            value
        ))),
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notegate"));
        }
    }
    Ok(home_dir()?.join(".config").join("notegate"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
