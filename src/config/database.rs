use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Database configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database URL for SQLite.
    /// TOML: `database.url`. Default: `sqlite://lexicon.db`.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Upper bound of pooled connections.
    /// TOML: `database.max_connections`. Default: `3`.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connections kept open while idle.
    /// TOML: `database.min_connections`. Default: `1`.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Seconds to wait for a free connection before failing the call.
    /// TOML: `database.acquire_timeout_secs`. Default: `60`.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Optional seed script replacing the bundled sample dictionary.
    /// Statements are split on `;` outside quotes, so trigger bodies
    /// (`BEGIN ...; END`) are not supported.
    /// TOML: `database.seed_script`. Default: unset.
    #[serde(default)]
    pub seed_script: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            seed_script: None,
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at `url` with default pool settings.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("database.url must be set and non-empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }
        if self.min_connections > self.max_connections {
            return Err(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                self.min_connections, self.max_connections
            ));
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite://lexicon.db".to_string()
}

fn default_max_connections() -> u32 {
    3
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    60
}
