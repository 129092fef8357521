//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;

/// Runtime configuration for the GameStringer server.
///
/// Every field except the Steam credentials has a default, so the server
/// starts without any environment set; refresh then fails with a clear
/// error until `STEAM_API_KEY` is provided.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind.
    pub bind_address: String,

    /// SeaORM connection string.
    pub database_url: String,

    /// Directory holding the library cache and the shared-games XML export.
    pub data_dir: PathBuf,

    /// `tracing` filter string, e.g. `"info"` or `"debug,sqlx=warn"`.
    pub log_level: String,

    /// Steam Web API key; required for library refresh.
    pub steam_api_key: Option<String>,

    /// Optional `steamLoginSecure` cookie for the family-sharing API.
    pub steam_family_cookie: Option<String>,
}

impl Config {
    /// Builds [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("GAMESTRINGER_BIND", "127.0.0.1:8175"),
            database_url: env_or(
                "GAMESTRINGER_DATABASE_URL",
                "sqlite://gamestringer.db?mode=rwc",
            ),
            data_dir: PathBuf::from(env_or("GAMESTRINGER_DATA_DIR", "./data")),
            log_level: env_or("GAMESTRINGER_LOG", "info"),
            steam_api_key: env_opt("STEAM_API_KEY"),
            steam_family_cookie: env_opt("STEAM_FAMILY_COOKIE"),
        }
    }

    /// Path of the optional shared-library XML export.
    pub fn shared_xml_path(&self) -> PathBuf {
        self.data_dir.join("shared_games.xml")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
