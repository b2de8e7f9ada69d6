//! Process configuration, read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present.
//!
//! ```bash
//! APP_HOST=0.0.0.0
//! APP_PORT=5001
//! ALLOWED_ORIGINS=http://localhost:3000,https://example.com
//! STATIC_DIR=./static
//! SENSOR_CSV=./sensor_data.csv
//! CORRIDOR_WIDTH=30.0
//! ```


use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenv::dotenv;

use crate::classify::DEFAULT_CORRIDOR_WIDTH;
use crate::impl_err;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl_err!(ConfigError, Config);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Origins permitted by CORS. Empty permits any origin.
    pub allowed_origins: Vec<String>,
    /// Directory serving `index.html`.
    pub static_dir: PathBuf,
    /// CSV file seeding the store at startup, if any.
    pub bootstrap_csv: Option<PathBuf>,
    /// Corridor half-width, in meters, for queries which do not supply one.
    pub corridor_width: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec![],
            static_dir: PathBuf::from("."),
            bootstrap_csv: None,
            corridor_width: DEFAULT_CORRIDOR_WIDTH,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment,
    /// after loading a `.env` file if one exists.
    pub fn from_env() -> crate::Result<Self> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which resolves a
    /// variable name to its value. Unset or empty variables take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Config::default();

        let corridor_width = parse(&get, "CORRIDOR_WIDTH")?.unwrap_or(defaults.corridor_width);
        if !(corridor_width.is_finite() && corridor_width >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "CORRIDOR_WIDTH",
                value: corridor_width.to_string(),
            }
            .into());
        }

        Ok(Config {
            host: get("APP_HOST").unwrap_or(defaults.host),
            port: parse(&get, "APP_PORT")?.unwrap_or(defaults.port),
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.allowed_origins),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            bootstrap_csv: get("SENSOR_CSV").map(PathBuf::from),
            corridor_width,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T, G>(get: &G, key: &'static str) -> crate::Result<Option<T>>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue { key, value }.into())
        })
        .transpose()
}
