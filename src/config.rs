use std::env;
use std::path::PathBuf;

use crate::models::DisplaySettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Seed document to load at startup. `None` uses the bundled default.
    pub seed_path: Option<PathBuf>,
    pub static_path: PathBuf,
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 7070,
            seed_path: None,
            static_path: PathBuf::from("static"),
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            host: env::var("SALESBOARD_HOST").unwrap_or(defaults.host),
            port: env::var("SALESBOARD_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            seed_path: env::var("SALESBOARD_SEED_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            static_path: env::var("SALESBOARD_STATIC_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_path),
            display: DisplaySettings {
                currency: env::var("SALESBOARD_CURRENCY").unwrap_or(defaults.display.currency),
                locale: env::var("SALESBOARD_LOCALE").unwrap_or(defaults.display.locale),
            },
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
