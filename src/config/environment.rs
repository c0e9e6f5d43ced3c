use std::env;
use std::time::Duration;

use crate::services::gas::DEFAULT_WINDOW_SIZE;

/// Environment configuration
/// Loads and validates environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub window_size: u64,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let window_size = match env::var("GAS_WINDOW_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&w| w > 0)
                .ok_or_else(|| format!("GAS_WINDOW_SIZE must be a positive integer, got {:?}", raw))?,
            Err(_) => DEFAULT_WINDOW_SIZE,
        };

        let timeout_secs = match env::var("GAS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&t| t > 0)
                .ok_or_else(|| {
                    format!("GAS_REQUEST_TIMEOUT_SECS must be a positive integer, got {:?}", raw)
                })?,
            Err(_) => 10,
        };

        Ok(Self {
            bind_addr,
            window_size,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
