//! Shell configuration
//!
//! Connection and shell settings live in a TOML file, by default
//! `<config dir>/s3fs/config.toml`. Every field has a default, so a missing
//! file or a partial one is valid.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable that overrides the configuration file location
pub const CONFIG_ENV: &str = "S3FS_CONFIG";

/// Default AWS region
const DEFAULT_REGION: &str = "us-east-1";

/// Default prompt text
const DEFAULT_PROMPT: &str = "> ";

/// Contents of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bumped whenever the file layout changes incompatibly
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Storage endpoint and credentials
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Interactive shell settings
    #[serde(default)]
    pub shell: ShellConfig,
}

/// Connection settings for the storage backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom S3-compatible endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Static access key ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Static secret access key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub path_style: bool,
}

/// Loading indicator style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderStyle {
    /// Print a dot every tick
    #[default]
    Dots,
    /// Animated spinner on stderr
    Spinner,
    /// No loading indicator
    None,
}

/// Color mode for shell output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Interactive shell settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Text shown before each input line
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Loading indicator shown during network-bound commands
    #[serde(default)]
    pub loader: LoaderStyle,

    /// Color mode
    #[serde(default)]
    pub color: ColorMode,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            connection: ConnectionConfig::default(),
            shell: ShellConfig::default(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            loader: LoaderStyle::default(),
            color: ColorMode::default(),
        }
    }
}

impl ConnectionConfig {
    /// Check endpoint syntax and credential pairing
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            url::Url::parse(endpoint)?;
        }

        match (&self.access_key, &self.secret_key) {
            (Some(_), None) | (None, Some(_)) => Err(Error::Config(
                "access_key and secret_key must be set together".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Static credentials, if both keys are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) => Some((access.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

/// Locates, reads and writes the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Use the default configuration location
    ///
    /// The `S3FS_CONFIG` environment variable takes precedence over the
    /// platform config directory.
    pub fn new() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(Self::with_path(PathBuf::from(path)));
        }

        dirs::config_dir()
            .map(|dir| Self::with_path(dir.join("s3fs").join("config.toml")))
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))
    }

    /// Use an explicit configuration file
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read the configuration file, falling back to defaults when it is absent
    pub fn load(&self) -> Result<Config> {
        let content = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3fs.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        config.connection.validate()?;
        Ok(config)
    }

    /// Write the configuration file, creating its directory if needed
    ///
    /// The file may hold credentials: it is readable by the owner only
    /// (0600) and replaced in one rename so a reader never sees half of it.
    pub fn save(&self, config: &Config) -> Result<()> {
        let dir = match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(toml::to_string_pretty(config)?.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        file.persist(&self.config_path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.config_path.display(), "saved configuration");
        Ok(())
    }
}
