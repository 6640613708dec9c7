use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::{env, fmt::Display, str::FromStr};

use tracing::info;

pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATA_PATH: &str = "data/escolas.json";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Process configuration, read from the environment. Command-line flags override it in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub data_path: PathBuf,
    pub api_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let host: String = try_load("ESCOLAS_BIND_HOST", DEFAULT_HOST)?;
        let port: u16 = try_load("PORT", DEFAULT_PORT)?;
        let bind = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("Invalid bind address {host}:{port}"))?;

        Ok(Self {
            bind,
            data_path: try_load("ESCOLAS_DATA", DEFAULT_DATA_PATH)?,
            api_url: try_load::<String>("ESCOLAS_API_URL", DEFAULT_API_URL)?
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value {raw:?}: {e}"))
}
