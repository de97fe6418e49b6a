//! diffbrief: bounded, redacted summaries of uncommitted git changes (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod credentials;
pub mod diff;
pub mod env;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod security;
pub mod validation;
pub mod workspace;
