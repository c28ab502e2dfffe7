//! Infrastructure adapters.

pub mod config;
pub mod logging;
