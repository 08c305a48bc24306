//! Flowboard configuration management using Figment
//!
//! Configuration controls the artificial latency of the mock entity services
//! and where seed fixtures are read from.
//!
//! # Sources
//!
//! Later sources override earlier ones:
//!
//! - Built-in defaults ([`FlowboardConfig::default`])
//! - Global: `~/.flowboard/flowboard.{toml,yaml,yml,json}`
//! - Project: `./.flowboard/flowboard.{toml,yaml,yml,json}`
//! - Explicit files passed to [`ConfigProvider::with_file`]
//! - Environment: `FLOWBOARD_` prefix, `__` separates nested keys
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! fixtures_dir = "./seed"
//!
//! [latency.card]
//! get_all_ms = 0
//! create_ms = 50
//! ```
//!
//! The same override from the environment:
//!
//! ```text
//! FLOWBOARD_LATENCY__CARD__CREATE_MS=50
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::ConfigError;
pub use provider::ConfigProvider;
pub use types::{FlowboardConfig, LatencyConfig, ServiceLatency};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load configuration from every available source
pub fn load_configuration() -> ConfigResult<FlowboardConfig> {
    ConfigProvider::new().load()
}
