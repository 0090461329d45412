//! Builder for configuring [`HandlerEnforcer`] instances.
//!
//! ```rust
//! use handler_enforcer::{HandlerEnforcer, MemoryLogger};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! let enforcer = HandlerEnforcer::builder()
//!     .logger(logger.clone())
//!     .build()?;
//! # Ok::<(), handler_enforcer::EnforcerError>(())
//! ```

use crate::config::EnforcerConfig;
use crate::enforcer::core::HandlerEnforcer;
use crate::error::EnforcerResult;
use crate::logging::{InvocationLogger, LogInvocationLogger};
use log::Level;
use std::sync::Arc;

/// Builder for [`HandlerEnforcer`].
///
/// Without an explicit logger, records go to a [`LogInvocationLogger`] set up
/// from the configuration.
#[derive(Default)]
pub struct HandlerEnforcerBuilder {
    config: EnforcerConfig,
    logger: Option<Arc<dyn InvocationLogger>>,
}

impl HandlerEnforcerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EnforcerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn log_level(mut self, level: Level) -> Self {
        self.config.log_level = level.as_str().to_lowercase();
        self
    }

    pub fn max_logged_len(mut self, max_len: usize) -> Self {
        self.config.max_logged_len = Some(max_len);
        self
    }

    /// Send invocation records to a custom logger instead of the `log` facade.
    ///
    /// `log_level` and `max_logged_len` only configure the default
    /// [`LogInvocationLogger`]. A custom logger receives every record
    /// unclipped; the settings stay visible through
    /// [`HandlerEnforcer::config`] but are otherwise unused.
    pub fn logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Validate the configuration and build the enforcer.
    pub fn build(self) -> EnforcerResult<HandlerEnforcer> {
        self.config.validate()?;

        let logger = match self.logger {
            Some(logger) => logger,
            None => Arc::new(LogInvocationLogger::new(
                self.config.level()?,
                self.config.max_logged_len,
            )),
        };

        Ok(HandlerEnforcer {
            config: self.config,
            logger,
        })
    }
}
