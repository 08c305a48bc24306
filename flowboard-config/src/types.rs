//! Strongly typed configuration values

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for a flowboard process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowboardConfig {
    /// Artificial latency applied by each entity service
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Directory holding `board.json`, `column.json`, `card.json` and `user.json`.
    /// When absent the embedded fixtures are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,
}

impl Default for FlowboardConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            fixtures_dir: None,
        }
    }
}

impl FlowboardConfig {
    /// Configuration with every service latency set to zero
    pub fn without_latency() -> Self {
        Self {
            latency: LatencyConfig::none(),
            fixtures_dir: None,
        }
    }

    /// Read fixtures from the given directory
    pub fn with_fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = Some(dir.into());
        self
    }
}

/// Per-service latency settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    pub board: ServiceLatency,
    pub column: ServiceLatency,
    pub card: ServiceLatency,
    pub user: ServiceLatency,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            board: ServiceLatency::from_millis(300, 200, 400, 350, 250),
            column: ServiceLatency::from_millis(250, 200, 300, 300, 200),
            card: ServiceLatency::from_millis(300, 200, 400, 350, 250),
            user: ServiceLatency::from_millis(200, 150, 300, 300, 200),
        }
    }
}

impl LatencyConfig {
    /// No artificial latency for any service
    pub fn none() -> Self {
        Self {
            board: ServiceLatency::none(),
            column: ServiceLatency::none(),
            card: ServiceLatency::none(),
            user: ServiceLatency::none(),
        }
    }
}

/// Latency applied to each operation of a single entity service, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceLatency {
    pub get_all_ms: u64,
    pub get_by_id_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub remove_ms: u64,
}

impl ServiceLatency {
    /// Build from millisecond values in operation order:
    /// get-all, get-by-id, create, update, remove.
    pub const fn from_millis(
        get_all_ms: u64,
        get_by_id_ms: u64,
        create_ms: u64,
        update_ms: u64,
        remove_ms: u64,
    ) -> Self {
        Self {
            get_all_ms,
            get_by_id_ms,
            create_ms,
            update_ms,
            remove_ms,
        }
    }

    pub const fn none() -> Self {
        Self::from_millis(0, 0, 0, 0, 0)
    }

    pub fn get_all(&self) -> Duration {
        Duration::from_millis(self.get_all_ms)
    }

    pub fn get_by_id(&self) -> Duration {
        Duration::from_millis(self.get_by_id_ms)
    }

    pub fn create(&self) -> Duration {
        Duration::from_millis(self.create_ms)
    }

    pub fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }

    pub fn remove(&self) -> Duration {
        Duration::from_millis(self.remove_ms)
    }

    /// True when every operation completes without artificial delay
    pub fn is_instant(&self) -> bool {
        *self == Self::none()
    }
}
