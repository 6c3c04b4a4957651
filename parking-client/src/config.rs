use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base path every endpoint hangs off (e.g. `/status`, `/admin/report`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; unset means the HTTP client's default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_booking_interval")]
    pub booking_interval_secs: u64,

    #[serde(default = "default_admin_interval")]
    pub admin_interval_secs: u64,

    /// Drop poll results that finish after a newer cycle already rendered
    #[serde(default)]
    pub latest_wins: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u64,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub poll: PollConfig,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/parking".to_string()
}

fn default_booking_interval() -> u64 {
    5
}

fn default_admin_interval() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_retention_days() -> u64 {
    3
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            booking_interval_secs: default_booking_interval(),
            admin_interval_secs: default_admin_interval(),
            latest_wins: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_retention_days: default_log_retention_days(),
            api: ApiConfig::default(),
            poll: PollConfig::default(),
        }
    }
}

impl PollConfig {
    pub fn booking_interval(&self) -> Duration {
        Duration::from_secs(self.booking_interval_secs.max(1))
    }

    pub fn admin_interval(&self) -> Duration {
        Duration::from_secs(self.admin_interval_secs.max(1))
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Like `from_file`, but a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Config path from the first command-line argument, else `config.toml`.
    pub fn path_from_args() -> String {
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "config.toml".to_string())
    }
}
