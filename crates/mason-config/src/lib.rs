//! Configuration management for Mason.
//!
//! Parses `mason.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `catalog.bundle`
//! - `publish.root`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site bundle file.
    pub bundle: Option<PathBuf>,
    /// Override the publish root directory.
    pub publish_root: Option<PathBuf>,
    /// Override the deployment attempt count.
    pub max_attempts: Option<u32>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mason.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog configuration (paths are relative strings from TOML).
    #[serde(default)]
    catalog: CatalogConfigRaw,
    /// Publish configuration (paths are relative strings from TOML).
    #[serde(default)]
    publish: PublishConfigRaw,
    /// Deployment retry configuration.
    pub deploy: DeployConfig,

    /// Resolved catalog configuration (set after loading).
    #[serde(skip)]
    pub catalog_resolved: CatalogConfig,
    /// Resolved publish configuration (set after loading).
    #[serde(skip)]
    pub publish_resolved: PublishConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw catalog configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CatalogConfigRaw {
    bundle: Option<String>,
}

/// Resolved catalog configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CatalogConfig {
    /// Site bundle file the CLI loads records from.
    pub bundle: PathBuf,
}

/// Raw publish configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PublishConfigRaw {
    root: Option<String>,
}

/// Resolved publish configuration with absolute paths.
#[derive(Debug, Default)]
pub struct PublishConfig {
    /// Directory built sites are published into, one subdirectory per
    /// domain.
    pub root: PathBuf,
}

/// Deployment retry configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Total deployment attempts, including the first.
    pub max_attempts: u32,
    /// Wait after the first failed attempt, in milliseconds. Doubles per
    /// attempt.
    pub backoff_ms: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 100,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`publish.root`").
        field: String,
        /// Error message (e.g., "${`MASON_PUBLISH_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mason.toml` in current directory and
    /// parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing
    /// fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(bundle) = &settings.bundle {
            self.catalog_resolved.bundle.clone_from(bundle);
        }
        if let Some(root) = &settings.publish_root {
            self.publish_resolved.root.clone_from(root);
        }
        if let Some(max_attempts) = settings.max_attempts {
            self.deploy.max_attempts = max_attempts;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working
    /// directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            catalog: CatalogConfigRaw::default(),
            publish: PublishConfigRaw::default(),
            deploy: DeployConfig::default(),
            catalog_resolved: CatalogConfig {
                bundle: base.join("site-bundle.json"),
            },
            publish_resolved: PublishConfig {
                root: base.join("dist"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const MAX_ATTEMPTS: u32 = 10;
        const MAX_BACKOFF_MS: u64 = 60_000;

        if self.deploy.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "deploy.max_attempts must be greater than 0".to_owned(),
            ));
        }
        if self.deploy.max_attempts > MAX_ATTEMPTS {
            return Err(ConfigError::Validation(format!(
                "deploy.max_attempts cannot exceed {MAX_ATTEMPTS}"
            )));
        }
        if self.deploy.backoff_ms > MAX_BACKOFF_MS {
            return Err(ConfigError::Validation(format!(
                "deploy.backoff_ms cannot exceed {MAX_BACKOFF_MS}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref bundle) = self.catalog.bundle {
            self.catalog.bundle = Some(expand::expand_env(bundle, "catalog.bundle")?);
        }
        if let Some(ref root) = self.publish.root {
            self.publish.root = Some(expand::expand_env(root, "publish.root")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.catalog_resolved = CatalogConfig {
            bundle: resolve(self.catalog.bundle.as_deref(), "site-bundle.json"),
        };
        self.publish_resolved = PublishConfig {
            root: resolve(self.publish.root.as_deref(), "dist"),
        };
    }
}
