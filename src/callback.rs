//! Completion callbacks and argument-count normalization.

use crate::operation::Arity;
use serde_json::Value;
use std::sync::Arc;

/// Completion callback as seen by handler implementations.
///
/// Handlers may call it with any number of values, any number of times, from
/// any thread, synchronously or after the handler call has returned.
pub type Callback = Arc<dyn Fn(Vec<Value>) + Send + Sync>;

/// Values delivered to a `search` callback: error, records, total.
pub type SearchOutput = [Value; 3];
/// Values delivered to a `find` callback: error, record.
pub type FindOutput = [Value; 2];
/// Values delivered to a `create` callback: error, record.
pub type CreateOutput = [Value; 2];
/// Values delivered to an `update` callback: error, record.
pub type UpdateOutput = [Value; 2];
/// Values delivered to a `delete` callback: error.
pub type DeleteOutput = [Value; 1];

/// Box a closure as a [`Callback`].
pub fn callback<F>(f: F) -> Callback
where
    F: Fn(Vec<Value>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Truncate or null-pad `args` to exactly `arity` values.
pub fn normalize(mut args: Vec<Value>, arity: Arity) -> Vec<Value> {
    let n = arity.get();
    args.truncate(n);
    args.resize(n, Value::Null);
    args
}

/// Convert an argument list into a fixed-size array, with the same
/// truncate-or-pad rule as [`normalize`].
pub fn fixed<const N: usize>(args: Vec<Value>) -> [Value; N] {
    let mut args = args.into_iter();
    std::array::from_fn(|_| args.next().unwrap_or(Value::Null))
}
