//! Common test utilities for handler enforcement tests.
//!
//! Provides logging setup, a recording enforcer, and a helper for awaiting
//! typed completions from handlers that may finish on another task.

#![allow(dead_code)]

use futures::channel::oneshot;
use handler_enforcer::{HandlerEnforcer, MemoryLogger};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub mod fixtures;
pub mod store;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Enforcer whose invocation records can be inspected.
pub fn recording_enforcer() -> (HandlerEnforcer, Arc<MemoryLogger>) {
    init_logging();
    let logger = Arc::new(MemoryLogger::new());
    let enforcer = HandlerEnforcer::builder()
        .logger(logger.clone())
        .build()
        .expect("default config is valid");
    (enforcer, logger)
}

/// Callback that delivers its first invocation to the returned receiver.
pub fn completion<const N: usize>() -> (
    impl Fn([Value; N]) + Send + Sync + 'static,
    oneshot::Receiver<[Value; N]>,
) {
    let (tx, rx) = oneshot::channel();
    let tx = Mutex::new(Some(tx));
    let callback = move |out: [Value; N]| {
        if let Some(tx) = tx.lock().unwrap().take() {
            let _ = tx.send(out);
        }
    };
    (callback, rx)
}

/// Callback that records every invocation.
pub fn collector<const N: usize>() -> (
    impl Fn([Value; N]) + Send + Sync + 'static,
    Arc<Mutex<Vec<[Value; N]>>>,
) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (move |out: [Value; N]| sink.lock().unwrap().push(out), calls)
}
