use std::env;
use std::net::{IpAddr, SocketAddr};

use mpp_tracking_core::ClientConfig;
use thiserror::Error;

use crate::auth::ApiToken;

const TOKEN_VAR: &str = "TRACKING_API_TOKEN";
const HOST_VAR: &str = "TRACKING_HOST";
const PORT_VAR: &str = "TRACKING_PORT";
const LOG_LEVEL_VAR: &str = "TRACKING_LOG_LEVEL";
const CONNECT_TIMEOUT_VAR: &str = "PORTAL_CONNECT_TIMEOUT_SECS";
const READ_TIMEOUT_VAR: &str = "PORTAL_READ_TIMEOUT_SECS";
const INSECURE_TLS_VAR: &str = "PORTAL_ACCEPT_INVALID_CERTS";

/// Top-level configuration for the relay.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub portal: ClientConfig,
    pub api_token: ApiToken,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(TOKEN_VAR)
            .as_deref()
            .and_then(ApiToken::new)
            .ok_or(ConfigError::MissingToken)?;

        let host = lookup(HOST_VAR).unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => 23459,
        };

        let log_level = lookup(LOG_LEVEL_VAR).unwrap_or_else(|| "info".to_string());

        let defaults = ClientConfig::default();
        let portal = ClientConfig {
            connect_timeout_secs: parse_secs(&lookup, CONNECT_TIMEOUT_VAR, defaults.connect_timeout_secs)?,
            read_timeout_secs: parse_secs(&lookup, READ_TIMEOUT_VAR, defaults.read_timeout_secs)?,
            accept_invalid_certs: parse_flag(&lookup, INSECURE_TLS_VAR, defaults.accept_invalid_certs)?,
        };

        Ok(Self {
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            portal,
            api_token,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidNumber { key, value }),
        },
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { key, value }),
        },
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Logging controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TRACKING_API_TOKEN must be set to a non-empty value")]
    MissingToken,

    #[error("TRACKING_PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),

    #[error("TRACKING_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },

    #[error("{key} must be a positive number of seconds, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be true or false, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
}
