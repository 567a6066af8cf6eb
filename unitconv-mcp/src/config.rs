//! Server configuration, read once from the environment at startup

use std::env;

/// Decimal places used when formatting results unless overridden
pub const DEFAULT_DECIMALS: usize = 6;

/// Largest accepted `UNITCONV_DECIMALS`; beyond this f64 output is noise
pub const MAX_DECIMALS: usize = 15;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Decimal places in formatted results (`UNITCONV_DECIMALS`)
    pub decimals: usize,
    /// `tracing` filter directive (`RUST_LOG`)
    pub log_filter: String,
    /// Problems found while reading the environment, logged once logging is up
    pub warnings: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            warnings: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; invalid values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("UNITCONV_DECIMALS") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n <= MAX_DECIMALS => config.decimals = n,
                Ok(n) => {
                    config.decimals = MAX_DECIMALS;
                    config.warnings.push(format!(
                        "UNITCONV_DECIMALS={} exceeds {}, using {}", n, MAX_DECIMALS, MAX_DECIMALS
                    ));
                }
                Err(_) => config.warnings.push(format!(
                    "UNITCONV_DECIMALS='{}' is not a non-negative integer, using {}", raw, DEFAULT_DECIMALS
                )),
            }
        }

        if let Some(filter) = lookup("RUST_LOG") {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }
}
