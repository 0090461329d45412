//! Core wrapping logic.
//!
//! A wrapped handler has the same shape as the one it wraps. On each call it
//! forwards the table, request and intermediate values untouched and swaps
//! the completion callback for a replacement that:
//!
//! 1. truncates or null-pads the values to the operation's arity,
//! 2. emits an [`InvocationRecord`] to the configured logger,
//! 3. calls the caller's callback with exactly the normalized values.
//!
//! Whatever the original handler returns is returned as-is.
//!
//! Wrapping an already-wrapped handler keeps the arity contract; each
//! completion is then logged once per layer.

use crate::callback::{Callback, normalize};
use crate::config::EnforcerConfig;
use crate::enforcer::builder::HandlerEnforcerBuilder;
use crate::error::EnforcerResult;
use crate::handler::{Handler, HandlerTable, handler as handler_fn};
use crate::logging::{InvocationLogger, InvocationRecord, LogInvocationLogger, serialize_for_log};
use crate::operation::{Arity, Operation};
use log::{debug, trace};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Applies the arity contract and invocation logging to handlers.
#[derive(Clone)]
pub struct HandlerEnforcer {
    pub(super) config: EnforcerConfig,
    pub(super) logger: Arc<dyn InvocationLogger>,
}

impl HandlerEnforcer {
    /// Enforcer with default configuration, logging through the `log` facade.
    pub fn new() -> Self {
        Self {
            config: EnforcerConfig::default(),
            logger: Arc::new(LogInvocationLogger::default()),
        }
    }

    /// Enforcer with default configuration and a custom logger.
    pub fn with_logger(logger: Arc<dyn InvocationLogger>) -> Self {
        Self {
            config: EnforcerConfig::default(),
            logger,
        }
    }

    pub fn builder() -> HandlerEnforcerBuilder {
        HandlerEnforcerBuilder::new()
    }

    pub fn config(&self) -> &EnforcerConfig {
        &self.config
    }

    /// Wrap one handler so its callback always receives `expected_arity` values.
    ///
    /// Returns `None` when `handler` is `None`; an absent handler is an
    /// intentional omission, not an error.
    pub fn wrap_handler(
        &self,
        operation: Operation,
        expected_arity: Arity,
        handler: Option<Handler>,
    ) -> Option<Handler> {
        let Some(original) = handler else {
            trace!("No {} handler supplied, leaving slot empty", operation);
            return None;
        };

        debug!(
            "Wrapping {} handler with expected arity {}",
            operation, expected_arity
        );

        let logger = Arc::clone(&self.logger);
        Some(handler_fn(move |table, request, args, callback| {
            let logger = Arc::clone(&logger);
            let params = serialize_for_log(&request.params);
            let request_id = request.request_id.clone();

            let replacement: Callback = Arc::new(move |produced: Vec<Value>| {
                let normalized = normalize(produced, expected_arity);
                logger.log_invocation(&InvocationRecord {
                    operation,
                    request_id: request_id.clone(),
                    params: params.clone(),
                    output: serialize_for_log(&normalized),
                });
                callback(normalized);
            });

            original(table, request, args, replacement)
        }))
    }

    /// Wrap one handler with an arity taken from untyped input.
    ///
    /// The arity is checked before anything else, so a missing or
    /// non-numeric value fails with a configuration error even when
    /// `handler` is absent.
    pub fn wrap_handler_from_value(
        &self,
        operation: &str,
        expected_arity: &Value,
        handler: Option<Handler>,
    ) -> EnforcerResult<Option<Handler>> {
        let arity = Arity::try_from(expected_arity)?;
        let operation: Operation = operation.parse()?;
        Ok(self.wrap_handler(operation, arity, handler))
    }

    /// Wrap a handler with its operation's fixed arity.
    pub fn wrap_operation(&self, operation: Operation, handler: Option<Handler>) -> Option<Handler> {
        self.wrap_handler(operation, operation.arity(), handler)
    }

    pub fn wrap_search(&self, handler: Option<Handler>) -> Option<Handler> {
        self.wrap_operation(Operation::Search, handler)
    }

    pub fn wrap_find(&self, handler: Option<Handler>) -> Option<Handler> {
        self.wrap_operation(Operation::Find, handler)
    }

    pub fn wrap_create(&self, handler: Option<Handler>) -> Option<Handler> {
        self.wrap_operation(Operation::Create, handler)
    }

    pub fn wrap_update(&self, handler: Option<Handler>) -> Option<Handler> {
        self.wrap_operation(Operation::Update, handler)
    }

    pub fn wrap_delete(&self, handler: Option<Handler>) -> Option<Handler> {
        self.wrap_operation(Operation::Delete, handler)
    }

    /// Replace every present slot of `table` with its wrapped version.
    pub fn wrap(&self, table: &mut HandlerTable) {
        for operation in Operation::ALL {
            let original = table.take(operation);
            table.set(operation, self.wrap_operation(operation, original));
        }
        debug!(
            "Handler table wrapped, operations: {:?}",
            table.operations()
        );
    }

    /// Consume `table` and return its wrapped version.
    pub fn wrapped(&self, mut table: HandlerTable) -> HandlerTable {
        self.wrap(&mut table);
        table
    }
}

impl Default for HandlerEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerEnforcer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEnforcer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Wrap every slot of `table` with a default [`HandlerEnforcer`].
pub fn wrap(table: &mut HandlerTable) {
    HandlerEnforcer::new().wrap(table);
}
