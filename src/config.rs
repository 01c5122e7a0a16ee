use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::DemoError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Prefix that requested file names are appended to. Keep the trailing slash.
    pub data_dir: String,
    /// Shell command the `host` parameter is appended to, after one space.
    pub ping_command: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            data_dir: "/app/data/".to_string(),
            ping_command: "ping -c 1".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `DEMO_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("DEMO_"))
    }

    pub fn load() -> Result<Self, DemoError> {
        Ok(Self::figment().extract()?)
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|e| {
        // The subscriber may not be installed yet, so stderr is the only sink.
        eprintln!("invalid configuration, falling back to defaults: {e}");
        Config::default()
    })
});
