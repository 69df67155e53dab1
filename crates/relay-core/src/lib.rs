//! # relay-core
//!
//! Core types, traits, configuration, and error handling for the relay bridge.

pub mod config;
pub mod error;
pub mod message;
pub mod sanitize;
pub mod traits;
