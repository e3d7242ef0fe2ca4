//! Binary-level tests in headless mode.

mod common;
mod headless_test;
