use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

const DEFAULT_DATABASE_PATH: &str = "calq.db";

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    /// Path of the SQLite file the store is opened at.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Values used to seed the settings row on first initialization.
    #[serde(default)]
    pub profile: ProfileConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProfileConfig {
    #[serde(default = "default_user_name")]
    pub name: String,
    #[serde(default = "default_target_calories")]
    pub target_calories: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            profile: ProfileConfig::default(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_user_name(),
            target_calories: default_target_calories(),
        }
    }
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_user_name() -> String {
    "User".to_string()
}

fn default_target_calories() -> i64 {
    crate::db::DEFAULT_TARGET_CALORIES
}

/// Loads configuration from a TOML file. All fields are optional in the
/// file and fall back to their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e)))?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents)
        .map_err(|e| Error::Config(format!("Failed to parse TOML config: {}", e)))
}

/// Loads the application configuration the way a front end should at
/// startup: `.env` is applied if present, `CALQ_CONFIG` may point at a TOML
/// file, and `CALQ_DATABASE_PATH` overrides the database path from either
/// source.
pub fn load_app_configuration() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let config_path = env::var("CALQ_CONFIG").ok();
    let db_override = env::var("CALQ_DATABASE_PATH").ok();
    resolve_configuration(config_path.as_deref(), db_override.as_deref())
}

fn resolve_configuration(
    config_path: Option<&str>,
    database_path_override: Option<&str>,
) -> Result<AppConfig> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(path) = database_path_override {
        config.database_path = path.to_string();
    }
    Ok(config)
}
