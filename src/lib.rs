//! termfeed - a scripted fake terminal in your real terminal.
//!
//! This library exposes the core modules for the binary and for integration
//! tests.

pub mod banner;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod timer;
pub mod transcript;
pub mod tui;
