//! Enforcer configuration.
//!
//! Configuration can be built in code, through
//! [`HandlerEnforcerBuilder`](crate::HandlerEnforcerBuilder), or loaded from
//! JSON:
//!
//! ```rust
//! use handler_enforcer::EnforcerConfig;
//!
//! let config = EnforcerConfig::from_json(r#"{"logLevel": "info", "maxLoggedLen": 512}"#)?;
//! assert_eq!(config.level()?, log::Level::Info);
//! # Ok::<(), handler_enforcer::EnforcerError>(())
//! ```

use crate::error::{EnforcerError, EnforcerResult};
use log::Level;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Settings for invocation logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EnforcerConfig {
    /// Level invocation records are logged at ("error" through "trace")
    pub log_level: String,

    /// Clip each serialized payload in log lines to this many bytes.
    /// Records handed to custom loggers are never clipped.
    pub max_logged_len: Option<usize>,
}

impl Default for EnforcerConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            max_logged_len: None,
        }
    }
}

impl EnforcerConfig {
    /// Parse and validate configuration from JSON text.
    pub fn from_json(json: &str) -> EnforcerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EnforcerError::configuration(format!("invalid enforcer config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a JSON value.
    pub fn from_value(value: Value) -> EnforcerResult<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| EnforcerError::configuration(format!("invalid enforcer config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field.
    pub fn validate(&self) -> EnforcerResult<()> {
        self.level()?;
        if self.max_logged_len == Some(0) {
            return Err(EnforcerError::configuration(
                "maxLoggedLen must be greater than zero",
            ));
        }
        Ok(())
    }

    /// The configured log level.
    pub fn level(&self) -> EnforcerResult<Level> {
        Level::from_str(&self.log_level).map_err(|_| {
            EnforcerError::configuration(format!("unknown log level '{}'", self.log_level))
        })
    }
}
