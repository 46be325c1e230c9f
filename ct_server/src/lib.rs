//! HTTP server for the chess tournament results tracker.
//!
//! Exposes the REST API, configuration loading, and logging setup used by the
//! `ct_server` binary and its integration tests.

pub mod api;
pub mod config;
pub mod logging;
