//! Observability for claimscan.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod fields;
pub mod setup;

pub use setup::{default_directives, init_tracing, resolve_filter};
