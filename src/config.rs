use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::PairingRules;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub pairing: PairingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairingSettings {
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: u16,
    #[serde(default = "default_max_fights")]
    pub max_fights_per_competitor: u32,
    #[serde(default = "default_load_penalty")]
    pub load_penalty: i64,
    #[serde(default = "default_priority_bonus")]
    pub priority_bonus: i64,
    #[serde(default = "default_priority_exact_bonus")]
    pub priority_exact_bonus: i64,
    #[serde(default = "default_exact_bonus")]
    pub exact_bonus: i64,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            weight_tolerance: default_weight_tolerance(),
            max_fights_per_competitor: default_max_fights(),
            load_penalty: default_load_penalty(),
            priority_bonus: default_priority_bonus(),
            priority_exact_bonus: default_priority_exact_bonus(),
            exact_bonus: default_exact_bonus(),
        }
    }
}

impl From<&PairingSettings> for PairingRules {
    fn from(settings: &PairingSettings) -> Self {
        Self {
            weight_tolerance: settings.weight_tolerance,
            max_fights_per_competitor: settings.max_fights_per_competitor,
            load_penalty: settings.load_penalty,
            priority_bonus: settings.priority_bonus,
            priority_exact_bonus: settings.priority_exact_bonus,
            exact_bonus: settings.exact_bonus,
        }
    }
}

fn default_weight_tolerance() -> u16 { 3 }
fn default_max_fights() -> u32 { 2 }
fn default_load_penalty() -> i64 { 10 }
fn default_priority_bonus() -> i64 { 200 }
fn default_priority_exact_bonus() -> i64 { 500 }
fn default_exact_bonus() -> i64 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with WEIGHT_MATCHER)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., WEIGHT_MATCHER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("WEIGHT_MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_database_url(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("WEIGHT_MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn pairing_rules(&self) -> PairingRules {
        PairingRules::from(&self.pairing)
    }
}

/// A plain DATABASE_URL overrides the configured database url
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pairing_matches_rules() {
        let settings = PairingSettings::default();
        assert_eq!(PairingRules::from(&settings), PairingRules::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_partial_pairing_section() {
        let config = Config::builder()
            .add_source(File::from_str(
                r#"
                [server]
                host = "127.0.0.1"
                port = 8080

                [pairing]
                weight_tolerance = 5
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let settings: Settings = config.try_deserialize().unwrap();
        let rules = settings.pairing_rules();

        assert_eq!(rules.weight_tolerance, 5);
        assert_eq!(rules.max_fights_per_competitor, 2);
        assert_eq!(rules.exact_bonus, 100);
        assert!(settings.database.url.is_none());
    }
}
