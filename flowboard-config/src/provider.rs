//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery},
    error::ConfigError,
    types::FlowboardConfig,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// Environment variable prefix, e.g. `FLOWBOARD_FIXTURES_DIR`
pub const ENV_PREFIX: &str = "FLOWBOARD_";

/// Separator for nested keys, e.g. `FLOWBOARD_LATENCY__CARD__CREATE_MS`
pub const ENV_SEPARATOR: &str = "__";

/// Loads [`FlowboardConfig`] from all sources.
///
/// Sources merge in precedence order (later overrides earlier):
/// 1. Defaults
/// 2. Discovered files (global, then project)
/// 3. Explicit files added with [`ConfigProvider::with_file`]
/// 4. `FLOWBOARD_` environment variables
///
/// Nothing is cached; every call to [`ConfigProvider::load`] reads fresh.
#[derive(Debug)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    explicit: Vec<PathBuf>,
    use_env: bool,
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self {
            discovery: FileDiscovery::new(),
            explicit: Vec::new(),
            use_env: true,
        }
    }

    /// Replace the file discovery (used to pin directories in tests)
    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Merge an explicit configuration file above the discovered ones
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit.push(path.into());
        self
    }

    /// Skip environment variables
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load and extract the configuration
    pub fn load(&self) -> ConfigResult<FlowboardConfig> {
        let figment = self.build_figment()?;
        let config: FlowboardConfig = figment.extract()?;

        if let Some(dir) = &config.fixtures_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::invalid_value("fixtures_dir", "path is empty"));
            }
        }

        info!(
            fixtures_dir = ?config.fixtures_dir,
            instant = config.latency.card.is_instant(),
            "Loaded flowboard configuration"
        );
        Ok(config)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        debug!("Building figment configuration with precedence order");

        let mut figment = Figment::new().merge(Serialized::defaults(FlowboardConfig::default()));

        for file in self.discovery.discover_all() {
            figment = figment.merge(load_config_file(&file));
        }

        for path in &self.explicit {
            let file = ConfigFile::from_path(path.clone(), ConfigScope::Explicit).ok_or_else(|| {
                ConfigError::invalid_value(
                    "config_file",
                    format!("unsupported file extension: {}", path.display()),
                )
            })?;
            if !file.path.is_file() {
                return Err(ConfigError::FileRead {
                    path: file.path.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
                });
            }
            figment = figment.merge(load_config_file(&file));
        }

        if self.use_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));
        }

        Ok(figment)
    }
}

fn load_config_file(file: &ConfigFile) -> Figment {
    trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
    match file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
        ConfigFormat::Json => Figment::from(Json::file(&file.path)),
    }
}
