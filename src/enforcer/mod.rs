//! Arity-normalizing handler wrapper.
//!
//! # Module Organization
//!
//! * [`core`] - The wrapper itself and the [`HandlerEnforcer`] that applies it
//! * [`builder`] - Builder for enforcers with custom configuration or loggers
//! * [`tests`] - Unit tests for the wrapping contract

pub mod builder;
pub mod core;


pub use builder::HandlerEnforcerBuilder;
pub use self::core::{HandlerEnforcer, wrap};
