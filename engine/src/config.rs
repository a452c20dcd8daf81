use crate::error::AppError;
use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MODEL_PATH: &str = "model.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub metrics_enabled: bool,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw =
            lookup("PHISH_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e| {
            AppError::Config(format!(
                "PHISH_BIND_ADDR {:?} is not a socket address: {}",
                bind_raw, e
            ))
        })?;

        let model_path = lookup("PHISH_MODEL_PATH")
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
            .into();

        let metrics_enabled = match lookup("PHISH_METRICS") {
            None => true,
            Some(value) => parse_flag(&value).ok_or_else(|| {
                AppError::Config(format!("PHISH_METRICS {:?} is not a boolean", value))
            })?,
        };

        Ok(Config {
            bind_addr,
            model_path,
            metrics_enabled,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
