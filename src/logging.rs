//! Invocation records and the sinks that receive them.
//!
//! Every completed invocation of a wrapped handler produces one
//! [`InvocationRecord`] holding the operation, the serialized request
//! parameters and the serialized normalized callback values. Records are
//! handed to an [`InvocationLogger`]; the default one writes them through the
//! `log` facade on a separate target per operation, so each operation can be
//! filtered independently:
//!
//! ```text
//! RUST_LOG=handler_enforcer::handler::search=debug
//! ```

use crate::operation::Operation;
use log::{Level, warn};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// One completed handler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationRecord {
    pub operation: Operation,
    /// Request ID, for correlating with the caller's own logs
    pub request_id: String,
    /// JSON text of the request's `params`
    pub params: String,
    /// JSON text of the normalized callback values
    pub output: String,
}

/// Receiver of invocation records.
///
/// Called after normalization and before the caller's callback runs, on
/// whichever thread the handler completed on.
pub trait InvocationLogger: Send + Sync {
    fn log_invocation(&self, record: &InvocationRecord);
}

/// Serialize a value to JSON text for logging.
///
/// Never fails: an unencodable value becomes an `<unserializable: ...>`
/// marker and a warning is logged, so logging cannot block a completion.
pub fn serialize_for_log<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!("Failed to serialize handler payload for logging: {}", e);
        format!("<unserializable: {}>", e)
    })
}

/// Default sink: writes each record through the `log` facade.
#[derive(Debug, Clone)]
pub struct LogInvocationLogger {
    level: Level,
    max_len: Option<usize>,
}

impl LogInvocationLogger {
    /// Log at `level`, optionally clipping each serialized payload.
    pub fn new(level: Level, max_len: Option<usize>) -> Self {
        Self { level, max_len }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogInvocationLogger {
    fn default() -> Self {
        Self::new(Level::Debug, None)
    }
}

impl InvocationLogger for LogInvocationLogger {
    fn log_invocation(&self, record: &InvocationRecord) {
        log::log!(
            target: record.operation.log_target(),
            self.level,
            "{} params={} output={} (request: '{}')",
            record.operation,
            clip(&record.params, self.max_len),
            clip(&record.output, self.max_len),
            record.request_id
        );
    }
}

fn clip(text: &str, max_len: Option<usize>) -> Cow<'_, str> {
    match max_len {
        Some(max) if text.len() > max => {
            let mut end = max;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            Cow::Owned(format!("{}...", &text[..end]))
        }
        _ => Cow::Borrowed(text),
    }
}

/// Test and debugging sink that keeps records in memory.
///
/// Unbounded by default; [`MemoryLogger::with_capacity`] keeps only the most
/// recent records.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<VecDeque<InvocationRecord>>,
    capacity: Option<usize>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` records, dropping the oldest first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::new()),
            capacity: Some(capacity),
        }
    }

    /// Snapshot of the retained records, oldest first.
    pub fn records(&self) -> Vec<InvocationRecord> {
        self.lock().iter().cloned().collect()
    }

    /// Records for a single operation, oldest first.
    pub fn records_for(&self, operation: Operation) -> Vec<InvocationRecord> {
        self.lock()
            .iter()
            .filter(|r| r.operation == operation)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<InvocationRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl InvocationLogger for MemoryLogger {
    fn log_invocation(&self, record: &InvocationRecord) {
        let mut records = self.lock();
        if self.capacity == Some(0) {
            return;
        }
        if self.capacity.is_some_and(|cap| records.len() >= cap) {
            records.pop_front();
        }
        records.push_back(record.clone());
    }
}
