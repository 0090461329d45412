//! Arity-normalizing wrapper for callback-style CRUD handlers.
//!
//! Handlers for the five operations (search, find, create, update, delete)
//! report their results through a completion callback, and hand-written
//! handlers are rarely consistent about how many values they pass. A
//! [`HandlerEnforcer`] wraps each handler so the caller's callback always
//! receives exactly the operation's fixed number of values (null-padded or
//! truncated) and every completion is logged.
//!
//! # Core Components
//!
//! - [`HandlerTable`] - The five handler slots, invoked with the table as context
//! - [`HandlerEnforcer`] - Wraps handlers and tables
//! - [`InvocationLogger`] - Sink for per-invocation records
//!
//! # Quick Start
//!
//! ```rust
//! use handler_enforcer::{HandlerTable, Operation, Request, handler, wrap};
//! use serde_json::{Value, json};
//!
//! let mut table = HandlerTable::new().with(
//!     Operation::Find,
//!     handler(|_table, _request, _args, callback| {
//!         // Reports only the error slot
//!         callback(vec![Value::Null]);
//!         Ok(())
//!     }),
//! );
//! wrap(&mut table);
//!
//! let request = Request::new("articles").with_params(json!({"id": "1"}));
//! table.find(&request, |[err, record]| {
//!     assert!(err.is_null());
//!     assert!(record.is_null());
//! })?;
//! # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
//! ```

pub mod callback;
pub mod config;
pub mod enforcer;
pub mod error;
pub mod handler;
pub mod logging;
pub mod operation;
pub mod request;

pub use callback::{
    Callback, CreateOutput, DeleteOutput, FindOutput, SearchOutput, UpdateOutput, callback,
    normalize,
};
pub use config::EnforcerConfig;
pub use enforcer::{HandlerEnforcer, HandlerEnforcerBuilder, wrap};
pub use error::{EnforcerError, EnforcerResult, HandlerError, HandlerResult};
pub use handler::{Handler, HandlerTable, handler};
pub use logging::{InvocationLogger, InvocationRecord, LogInvocationLogger, MemoryLogger};
pub use operation::{Arity, DESCRIPTORS, Operation, OperationDescriptor};
pub use request::Request;
