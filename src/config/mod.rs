mod basic;
mod database;

pub use basic::BasicConfig;
pub use database::DatabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Connection pool and seed settings (see `database` table in config.toml).
    #[serde(default)]
    pub database: DatabaseConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "LEXICON_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `LEXICON_`-prefixed environment variables (`__` separates tables).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts and validates a configuration from any Figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, String> {
        let cfg: Self = figment.extract().map_err(|err| err.to_string())?;
        cfg.database.validate()?;
        Ok(cfg)
    }

    /// Loads configuration by merging defaults, `config.toml` if present and
    /// the environment.
    pub fn from_optional_toml() -> Self {
        Self::from_figment(&Self::figment()).unwrap_or_else(|err| {
            panic!("failed to load configuration (defaults + optional config.toml + env): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_optional_toml);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.basic.listen_port, 8188);
        assert_eq!(cfg.basic.loglevel, "info");
        assert_eq!(cfg.database.url, "sqlite://lexicon.db");
        assert_eq!(cfg.database.max_connections, 3);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(cfg.database.acquire_timeout_secs, 60);
        assert!(cfg.database.seed_script.is_none());
    }

    #[test]
    fn toml_overrides_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                listen_port = 9000

                [database]
                url = "sqlite::memory:"
                max_connections = 1
                seed_script = "sql/custom.sql"
                "#,
            ));
        let cfg = Config::from_figment(&figment).unwrap();
        assert_eq!(cfg.basic.listen_port, 9000);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 1);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(
            cfg.database.seed_script,
            Some(PathBuf::from("sql/custom.sql"))
        );
    }

    #[test]
    fn empty_pool_is_rejected() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string("[database]\nmax_connections = 0\n"));
        assert!(Config::from_figment(&figment).is_err());
    }
}
