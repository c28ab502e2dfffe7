pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

pub use app::format::{DEFAULT_TEMPLATE, Formatter, Template, uncompress};
pub use app::group::group;
pub use domain::{Item, Sequence, SequenceError, diff};

/// Install logging for the given `-v` count.
pub fn init(verbosity: u8) {
    infra::logging::init(verbosity);
}
