//! Handler functions and the table that holds them.
//!
//! A [`Handler`] receives the table it is invoked through as an explicit
//! context parameter, so an implementation can reach its sibling operations
//! (an `update` that starts with a `find`, for example). Since wrapped and
//! unwrapped handlers share one type, a wrapped table can be wrapped again.

use crate::callback::{
    Callback, CreateOutput, DeleteOutput, FindOutput, SearchOutput, UpdateOutput, fixed,
};
use crate::error::{EnforcerError, HandlerResult};
use crate::operation::Operation;
use crate::request::Request;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A handler implementation for one operation.
///
/// Arguments are the enclosing table, the request, any intermediate
/// positional values, and the completion callback. An `Err` return reports a
/// failure to start the operation; results travel through the callback.
pub type Handler =
    Arc<dyn Fn(&HandlerTable, &Request, Vec<Value>, Callback) -> HandlerResult + Send + Sync>;

/// Box a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&HandlerTable, &Request, Vec<Value>, Callback) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Up to five handlers, one slot per [`Operation`].
///
/// Empty slots are operations the owner chose not to implement.
#[derive(Clone, Default)]
pub struct HandlerTable {
    search: Option<Handler>,
    find: Option<Handler>,
    create: Option<Handler>,
    update: Option<Handler>,
    delete: Option<Handler>,
}

impl HandlerTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill a slot, consuming and returning the table.
    pub fn with(mut self, operation: Operation, handler: Handler) -> Self {
        *self.slot_mut(operation) = Some(handler);
        self
    }

    /// Handler registered for `operation`, if any.
    pub fn get(&self, operation: Operation) -> Option<&Handler> {
        match operation {
            Operation::Search => self.search.as_ref(),
            Operation::Find => self.find.as_ref(),
            Operation::Create => self.create.as_ref(),
            Operation::Update => self.update.as_ref(),
            Operation::Delete => self.delete.as_ref(),
        }
    }

    /// Replace a slot, returning the previous occupant.
    pub fn set(&mut self, operation: Operation, handler: Option<Handler>) -> Option<Handler> {
        std::mem::replace(self.slot_mut(operation), handler)
    }

    /// Empty a slot, returning its handler.
    pub fn take(&mut self, operation: Operation) -> Option<Handler> {
        self.slot_mut(operation).take()
    }

    /// Whether `operation` has a handler.
    pub fn contains(&self, operation: Operation) -> bool {
        self.get(operation).is_some()
    }

    /// Operations with a registered handler, in [`Operation::ALL`] order.
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.contains(*op))
            .collect()
    }

    fn slot_mut(&mut self, operation: Operation) -> &mut Option<Handler> {
        match operation {
            Operation::Search => &mut self.search,
            Operation::Find => &mut self.find,
            Operation::Create => &mut self.create,
            Operation::Update => &mut self.update,
            Operation::Delete => &mut self.delete,
        }
    }

    /// Invoke the handler for `operation` with this table as its context.
    ///
    /// Fails with [`EnforcerError::UnsupportedOperation`] when the slot is
    /// empty; otherwise returns whatever the handler returns.
    pub fn invoke(
        &self,
        operation: Operation,
        request: &Request,
        args: Vec<Value>,
        callback: Callback,
    ) -> HandlerResult {
        let handler = self
            .get(operation)
            .ok_or(EnforcerError::UnsupportedOperation(operation))?;
        handler(self, request, args, callback)
    }

    /// Invoke `operation` and receive its completion as an `N`-element array.
    ///
    /// `N` must equal the operation's arity; anything else fails with
    /// [`EnforcerError::Configuration`] before the handler runs.
    pub fn call<const N: usize, F>(
        &self,
        operation: Operation,
        request: &Request,
        on_complete: F,
    ) -> HandlerResult
    where
        F: Fn([Value; N]) + Send + Sync + 'static,
    {
        if N != operation.arity().get() {
            return Err(EnforcerError::configuration(format!(
                "{} completes with {} value(s), not {}",
                operation,
                operation.arity(),
                N
            ))
            .into());
        }
        let callback: Callback = Arc::new(move |args: Vec<Value>| on_complete(fixed::<N>(args)));
        self.invoke(operation, request, Vec::new(), callback)
    }

    /// Run `search`; completes with `[error, records, total]`.
    pub fn search<F>(&self, request: &Request, on_complete: F) -> HandlerResult
    where
        F: Fn(SearchOutput) + Send + Sync + 'static,
    {
        self.call(Operation::Search, request, on_complete)
    }

    /// Run `find`; completes with `[error, record]`.
    pub fn find<F>(&self, request: &Request, on_complete: F) -> HandlerResult
    where
        F: Fn(FindOutput) + Send + Sync + 'static,
    {
        self.call(Operation::Find, request, on_complete)
    }

    /// Run `create`; completes with `[error, record]`.
    pub fn create<F>(&self, request: &Request, on_complete: F) -> HandlerResult
    where
        F: Fn(CreateOutput) + Send + Sync + 'static,
    {
        self.call(Operation::Create, request, on_complete)
    }

    /// Run `update`; completes with `[error, record]`.
    pub fn update<F>(&self, request: &Request, on_complete: F) -> HandlerResult
    where
        F: Fn(UpdateOutput) + Send + Sync + 'static,
    {
        self.call(Operation::Update, request, on_complete)
    }

    /// Run `delete`; completes with `[error]`.
    pub fn delete<F>(&self, request: &Request, on_complete: F) -> HandlerResult
    where
        F: Fn(DeleteOutput) + Send + Sync + 'static,
    {
        self.call(Operation::Delete, request, on_complete)
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("operations", &self.operations())
            .finish()
    }
}
