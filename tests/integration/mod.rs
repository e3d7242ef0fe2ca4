//! Library-level tests: key interpretation, dispatch and configuration.

pub mod config_test;
pub mod dispatch_test;
