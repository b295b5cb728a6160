//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use phishguard_core::TrainingConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Optional JSONL training corpus; the built-in seed corpus is used otherwise
    pub corpus_path: Option<PathBuf>,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Classifier training knobs
    pub training: TrainingConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key → value source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = TrainingConfig::default();

        Self {
            host: lookup("HOST")
                .map(|h| parse_host(&h))
                .unwrap_or(DEFAULT_HOST),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            corpus_path: lookup("CORPUS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),

            log_format: LogFormat::parse(lookup("LOG_FORMAT").as_deref()),

            training: TrainingConfig {
                max_iterations: lookup("TRAIN_MAX_ITERATIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_iterations),
                learning_rate: lookup("TRAIN_LEARNING_RATE")
                    .and_then(|v| v.parse().ok())
                    .filter(|v: &f64| *v > 0.0)
                    .unwrap_or(defaults.learning_rate),
                l2_c: lookup("TRAIN_L2_C")
                    .and_then(|v| v.parse().ok())
                    .filter(|v: &f64| *v > 0.0)
                    .unwrap_or(defaults.l2_c),
                ..defaults
            },
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// HOST must be an IP literal; anything else binds all interfaces
fn parse_host(value: &str) -> IpAddr {
    match value.trim().parse() {
        Ok(host) => host,
        Err(_) => {
            tracing::warn!(
                "HOST '{}' is not an IP address - falling back to {} (all interfaces)",
                value,
                DEFAULT_HOST
            );
            DEFAULT_HOST
        }
    }
}
