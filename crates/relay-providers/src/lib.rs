//! # relay-providers
//!
//! AI assistant provider implementations for relay.

pub mod gemini_cli;
