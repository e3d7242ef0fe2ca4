//! TUI widgets for termfeed.
//!
//! Contains the window chrome and the transcript panel.

pub mod title_bar;
pub mod transcript;
