use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::constants::{defaults, envvars};

/// Runtime options, resolved once at startup from the environment
/// (on top of an optional `.env` file loaded in `main`).
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub wait_window: Duration,
    pub sensor_pin: u8,
    pub button_pin: u8,
    pub net_interface: String,
    pub plot_out: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = env_or(envvars::API_BASE_URL, defaults::API_BASE_URL);
        Url::parse(&api_base_url)
            .with_context(|| format!("invalid API base URL: {api_base_url}"))?;

        Ok(Config {
            api_base_url,
            wait_window: Duration::from_secs(parse_env(
                envvars::WAIT_SECONDS,
                defaults::WAIT_SECONDS,
            )?),
            sensor_pin: parse_env(envvars::SENSOR_PIN, defaults::SENSOR_PIN)?,
            button_pin: parse_env(envvars::BUTTON_PIN, defaults::BUTTON_PIN)?,
            net_interface: env_or(envvars::NET_INTERFACE, defaults::NET_INTERFACE),
            plot_out: PathBuf::from(env_or(envvars::PLOT_OUT, defaults::PLOT_OUT)),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(var: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid value for {var}: {raw}")),
        Err(_) => Ok(default),
    }
}
