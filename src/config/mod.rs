use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::PageSize;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout_seconds: u64,
    pub page_size: PageSize,
    pub allowed_extensions: HashSet<String>,
}

/// Extensions accepted when `ALLOWED_EXTENSIONS` is not set.
pub fn default_allowed_extensions() -> HashSet<String> {
    ["jpg", "jpeg", "png", "gif"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", 10)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            max_concurrent_requests: Self::parse_env_var("MAX_CONCURRENT_REQUESTS", 100)
                .context("Failed to parse MAX_CONCURRENT_REQUESTS")?,
            request_timeout_seconds: Self::parse_env_var("REQUEST_TIMEOUT_SECONDS", 30)
                .context("Failed to parse REQUEST_TIMEOUT_SECONDS")?,
            page_size: Self::page_size_from_env(),
            allowed_extensions: Self::allowed_extensions_from_env(),
        };

        config.validate()?;

        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {} (using default: {:?})",
                        var_name, e, default
                    );
                    Ok(default)
                }
            },
            Err(_) => Ok(default),
        }
    }

    fn page_size_from_env() -> PageSize {
        match env::var("PAGE_SIZE") {
            Ok(name) => PageSize::from_name(&name).unwrap_or_else(|| {
                warn!("Unknown PAGE_SIZE {:?}, falling back to A4", name);
                PageSize::A4
            }),
            Err(_) => PageSize::A4,
        }
    }

    fn allowed_extensions_from_env() -> HashSet<String> {
        let configured: HashSet<String> = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_default()
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        if configured.is_empty() {
            default_allowed_extensions()
        } else {
            configured
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(anyhow::anyhow!(
                "MAX_CONCURRENT_REQUESTS must be greater than 0"
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECONDS must be greater than 0"
            ));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }
        Ok(())
    }
}
