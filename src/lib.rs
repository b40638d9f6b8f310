//! skyview library
//!
//! Weather lookup, forecast aggregation, and the terminal UI, exposed for the
//! binary and integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod display;
pub mod logging;
pub mod query;
pub mod ui;
