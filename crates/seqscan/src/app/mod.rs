//! Application layer orchestrating domain logic and infrastructure.

pub mod format;
pub mod group;
pub mod listing;
pub mod scan;
