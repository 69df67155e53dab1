//! # relay-channels
//!
//! Messaging platform integrations for relay.

pub mod telegram;
mod utils;
