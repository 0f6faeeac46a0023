//! Server configuration.

use serde::{Deserialize, Serialize};

use coursebook_core::{Error, Result};

/// Configuration for the Coursebook API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server port.
    pub http_port: u16,

    /// Enable debug mode (pretty logs instead of JSON).
    pub debug: bool,

    /// Path to a JSON seed file imported into the store at startup.
    #[serde(default)]
    pub seed_path: Option<String>,

    /// Optional request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Optional concurrency limit for request handling.
    #[serde(default)]
    pub concurrency_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            debug: false,
            seed_path: None,
            request_timeout_secs: None,
            concurrency_limit: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Supported env vars:
    /// - `COURSEBOOK_HTTP_PORT`
    /// - `COURSEBOOK_DEBUG`
    /// - `COURSEBOOK_SEED_PATH`
    /// - `COURSEBOOK_REQUEST_TIMEOUT_SECS`
    /// - `COURSEBOOK_CONCURRENCY_LIMIT`
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable is present but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = env_u16("COURSEBOOK_HTTP_PORT")? {
            config.http_port = port;
        }
        if let Some(debug) = env_bool("COURSEBOOK_DEBUG")? {
            config.debug = debug;
        }
        config.seed_path = env_string("COURSEBOOK_SEED_PATH");
        if let Some(secs) = env_u64("COURSEBOOK_REQUEST_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(Error::InvalidInput(
                    "COURSEBOOK_REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
                ));
            }
            config.request_timeout_secs = Some(secs);
        }
        if let Some(limit) = env_usize("COURSEBOOK_CONCURRENCY_LIMIT")? {
            if limit == 0 {
                return Err(Error::InvalidInput(
                    "COURSEBOOK_CONCURRENCY_LIMIT must be greater than 0".to_string(),
                ));
            }
            config.concurrency_limit = Some(limit);
        }

        Ok(config)
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn env_u16(name: &str) -> Result<Option<u16>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    v.parse::<u16>()
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("{name} must be a u16: {e}")))
}

fn env_u64(name: &str) -> Result<Option<u64>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    v.parse::<u64>()
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("{name} must be a u64: {e}")))
}

fn env_usize(name: &str) -> Result<Option<usize>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    v.parse::<usize>()
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("{name} must be a usize: {e}")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(Error::InvalidInput(format!(
            "{name} must be a boolean (true/false/1/0)"
        ))),
    }
}

fn env_bool(name: &str) -> Result<Option<bool>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    parse_bool(name, &v).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_8080() {
        let config = Config::default();
        assert_eq!(config.http_port, 8080);
        assert!(!config.debug);
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn parse_bool_accepts_true_values() {
        assert!(parse_bool("TEST", "true").unwrap());
        assert!(parse_bool("TEST", "1").unwrap());
        assert!(parse_bool("TEST", "yes").unwrap());
        assert!(parse_bool("TEST", "TRUE").unwrap());
    }

    #[test]
    fn parse_bool_accepts_false_values() {
        assert!(!parse_bool("TEST", "false").unwrap());
        assert!(!parse_bool("TEST", "0").unwrap());
        assert!(!parse_bool("TEST", "no").unwrap());
        assert!(!parse_bool("TEST", "FALSE").unwrap());
    }

    #[test]
    fn parse_bool_rejects_invalid_values() {
        assert!(parse_bool("TEST", "maybe").is_err());
        assert!(parse_bool("TEST", "").is_err());
    }
}
